use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use reqwest::Url;
use spider_client::shapes::request::{ReturnFormat, ReturnFormatHandling};
use spider_client::{RequestParams, Spider};
use tracing::{info, warn};

const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 2000;

/// Force `dt=YYYY-MM-DD` on the configured listWeek URL so Celcat renders
/// the week containing `date`. Every other query parameter is kept as-is.
pub fn week_url_for(template: &str, date: NaiveDate) -> Result<String> {
    let mut url = Url::parse(template)
        .with_context(|| format!("invalid listWeek URL: {template}"))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "dt")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair("dt", &date.format("%Y-%m-%d").to_string());
    }

    Ok(url.into())
}

/// Fetch the rendered week view and return its text. Celcat's list view is
/// client-rendered, so a plain GET yields an empty shell; spider.cloud
/// executes the page and returns the visible content. Transient API errors
/// (rate limits, 5xx) are retried with exponential backoff.
pub async fn fetch_week_text(url: &str) -> Result<String> {
    let api_key = std::env::var("SPIDER_API_KEY")
        .context("SPIDER_API_KEY environment variable must be set")?;
    let spider = Spider::new(Some(api_key))
        .map_err(|e| anyhow!("failed to create Spider client: {}", e))?;

    for attempt in 0..MAX_RETRIES {
        match fetch_once(&spider, url).await {
            Ok(text) => return Ok(text),
            Err(e) => {
                let msg = e.to_string();
                let transient = msg.contains("429")
                    || msg.contains("rate")
                    || msg.contains("500")
                    || msg.contains("502")
                    || msg.contains("503");
                if !transient {
                    return Err(e);
                }
                let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
                warn!(
                    "Transient fetch error (attempt {}/{}), backing off {:.1}s: {}",
                    attempt + 1,
                    MAX_RETRIES,
                    backoff.as_secs_f64(),
                    msg
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }

    fetch_once(&spider, url).await
}

async fn fetch_once(spider: &Spider, url: &str) -> Result<String> {
    let params = RequestParams {
        return_format: Some(ReturnFormatHandling::Single(ReturnFormat::Markdown)),
        ..Default::default()
    };

    let start = Instant::now();
    let response = spider
        .scrape_url(url, Some(params), "application/json")
        .await
        .map_err(|e| anyhow!("spider scrape failed: {}", e))?;

    let parsed: serde_json::Value = match response.as_str() {
        Some(s) => serde_json::from_str(s).unwrap_or(response.clone()),
        None => response,
    };

    let content = parsed
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|obj| obj.get("content"))
        .and_then(|c| c.as_str())
        .map(strip_images)
        .ok_or_else(|| anyhow!("no content in spider response"))?;

    info!("Fetched week view in {} ms", start.elapsed().as_millis());
    Ok(content)
}

/// Remove markdown image syntax the renderer leaves behind: ![alt](url).
fn strip_images(md: &str) -> String {
    let re = Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap();
    let cleaned = re.replace_all(md, "");
    let blanks = Regex::new(r"\n{3,}").unwrap();
    blanks.replace_all(&cleaned, "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn dt_param_is_replaced() {
        let url = week_url_for(
            "https://edt.example.fr/cal?view=listWeek&fid0=G1&dt=2020-01-01",
            d(2025, 3, 15),
        )
        .unwrap();
        assert!(url.contains("dt=2025-03-15"));
        assert!(!url.contains("dt=2020-01-01"));
        assert!(url.contains("view=listWeek"));
        assert!(url.contains("fid0=G1"));
    }

    #[test]
    fn dt_param_is_added_when_missing() {
        let url = week_url_for("https://edt.example.fr/cal?view=listWeek", d(2025, 3, 15)).unwrap();
        assert!(url.contains("view=listWeek"));
        assert!(url.contains("dt=2025-03-15"));
    }

    #[test]
    fn invalid_url_is_an_error() {
        assert!(week_url_for("not a url", d(2025, 3, 15)).is_err());
    }

    #[test]
    fn images_are_stripped() {
        let md = "before\n![logo](https://x/logo.png)\nafter";
        let cleaned = strip_images(md);
        assert!(!cleaned.contains("logo.png"));
        assert!(cleaned.contains("before"));
        assert!(cleaned.contains("after"));
    }
}
