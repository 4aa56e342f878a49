use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;
use serde_json::{json, Value};
use tracing::info;

use crate::parser::{locale, Event};

/// Discord caps embeds per message.
const MAX_EMBEDS: usize = 10;
const EMBED_COLOR: u32 = 0xE6443A;
const TITLE_LIMIT: usize = 256;
const FIELD_LIMIT: usize = 1024;

static MD_SPECIALS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([_*~`>])").unwrap());

/// Backslash-escape the characters Discord renders as markdown. Event fields
/// are free text scraped off a web page; anything in them is data, not
/// formatting.
pub fn md_escape(s: &str) -> String {
    MD_SPECIALS.replace_all(s, r"\$1").to_string()
}

/// French day label, capitalized: `Jeudi 7 août 2025`.
pub fn day_label(date: NaiveDate) -> String {
    let weekday = locale::WEEKDAY_DISPLAY_FR[date.weekday().num_days_from_monday() as usize];
    let month = locale::MONTH_DISPLAY_FR[date.month0() as usize];
    let label = format!("{} {} {} {}", weekday, date.day(), month, date.year());
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => label,
    }
}

/// Build the webhook payload: one rich embed per event, or a plain "nothing
/// scheduled" message when the day is empty.
pub fn build_payload(
    events: &[Event],
    date: NaiveDate,
    week_url: &str,
    timestamp: DateTime<Utc>,
) -> Value {
    let label = day_label(date);

    if events.is_empty() {
        return json!({
            "content": format!("🗓️ **{label}** — *Aucun cours prévu.*\n<{week_url}>"),
        });
    }

    let embeds: Vec<Value> = events
        .iter()
        .take(MAX_EMBEDS)
        .map(|e| {
            let mut fields = vec![json!({
                "name": "🕒 Horaires",
                "value": format!("**{}–{}**", e.start, e.end),
                "inline": true,
            })];
            if let Some(teachers) = &e.teachers {
                fields.push(json!({
                    "name": "👩‍🏫 Enseignants",
                    "value": cap(&md_escape(teachers), FIELD_LIMIT),
                    "inline": false,
                }));
            }
            if let Some(room) = &e.room {
                fields.push(json!({
                    "name": "🏫 Salle",
                    "value": md_escape(room),
                    "inline": true,
                }));
            }
            if let Some(kind) = &e.kind {
                fields.push(json!({
                    "name": "🏷️ Type",
                    "value": cap(&md_escape(kind), FIELD_LIMIT),
                    "inline": true,
                }));
            }

            json!({
                "title": cap(&e.title, TITLE_LIMIT),
                "type": "rich",
                "url": week_url,
                "timestamp": timestamp.to_rfc3339(),
                "color": EMBED_COLOR,
                "fields": fields,
                "footer": { "text": "Extrait de CELCAT" },
            })
        })
        .collect();

    json!({
        "content": format!("🗓️ **{label}** — emploi du temps :"),
        "embeds": embeds,
    })
}

/// POST the payload to the Discord webhook.
pub async fn post(webhook_url: &str, payload: &Value) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("building HTTP client")?;

    let response = client
        .post(webhook_url)
        .json(payload)
        .send()
        .await
        .context("posting Discord webhook")?;
    response
        .error_for_status()
        .context("Discord webhook rejected the payload")?;

    info!("Notification delivered");
    Ok(())
}

/// Truncate on a char boundary to Discord's length limits.
fn cap(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(start: &str, title: &str) -> Event {
        Event {
            date: NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
            start: start.into(),
            end: "23:59".into(),
            title: title.into(),
            room: Some("CUVIER-B204".into()),
            teachers: Some("Dupont, Martin".into()),
            kind: None,
        }
    }

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 6, 18, 0, 0).unwrap()
    }

    #[test]
    fn escapes_markdown_specials() {
        assert_eq!(md_escape("a_b*c`d"), r"a\_b\*c\`d");
        assert_eq!(md_escape("plain"), "plain");
    }

    #[test]
    fn french_day_label() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        assert_eq!(day_label(date), "Jeudi 7 août 2025");
    }

    #[test]
    fn empty_day_is_a_plain_message() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let payload = build_payload(&[], date, "https://edt.example.fr", ts());
        let content = payload["content"].as_str().unwrap();
        assert!(content.contains("Aucun cours"));
        assert!(content.contains("https://edt.example.fr"));
        assert!(payload.get("embeds").is_none());
    }

    #[test]
    fn one_embed_per_event() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let events = vec![event("09:00", "Algorithmique"), event("14:00", "Compilation")];
        let payload = build_payload(&events, date, "https://edt.example.fr", ts());
        let embeds = payload["embeds"].as_array().unwrap();
        assert_eq!(embeds.len(), 2);
        assert_eq!(embeds[0]["title"], "Algorithmique");
        assert_eq!(embeds[0]["color"], 0xE6443A);
        let fields = embeds[0]["fields"].as_array().unwrap();
        assert_eq!(fields[0]["value"], "**09:00–23:59**");
    }

    #[test]
    fn embeds_are_capped_at_ten() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let events: Vec<Event> = (0..12).map(|i| event("09:00", &format!("c{i}"))).collect();
        let payload = build_payload(&events, date, "https://edt.example.fr", ts());
        assert_eq!(payload["embeds"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn cap_truncates_long_text() {
        assert_eq!(cap("abcdef", 4), "abcd");
        assert_eq!(cap("abc", 4), "abc");
    }
}
