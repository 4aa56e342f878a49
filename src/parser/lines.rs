use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::locale;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DATE_FULL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(\d{1,2})\s+([a-zéèêëàâîïôöûüç]+)\s+(\d{4})\s*$").unwrap());
static TIME_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}:\d{2})\s*[–-]\s*(\d{1,2}:\d{2})\b").unwrap());

/// Collapse whitespace runs to single spaces, trim, and drop empty lines.
/// Order is preserved; segmentation depends on it.
pub fn normalize(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| WS_RE.replace_all(l, " ").trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// `15 mars 2025` / `15 March 2025` → a calendar date, if the month name is
/// known and the day/month/year combination exists.
pub fn parse_full_date(line: &str) -> Option<NaiveDate> {
    let caps = DATE_FULL_RE.captures(line)?;
    let day: u32 = caps[1].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let month = locale::month_number(&caps[2])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// A matched `HH:MM`–`HH:MM` pair. The match-end byte offset comes along so
/// the caller can slice off the trailing text on the same line.
#[derive(Debug)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
    pub end_offset: usize,
}

pub fn find_time_range(line: &str) -> Option<TimeRange> {
    let caps = TIME_RANGE_RE.captures(line)?;
    let whole = caps.get(0)?;
    Some(TimeRange {
        start: caps[1].to_string(),
        end: caps[2].to_string(),
        end_offset: whole.end(),
    })
}

/// A line that is nothing but a weekday name ends a chunk but is otherwise
/// noise.
pub fn is_weekday_header(line: &str) -> bool {
    locale::is_weekday_name(line.trim())
}
