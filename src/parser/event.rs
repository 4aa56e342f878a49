use chrono::NaiveDate;
use serde::Serialize;

/// One scheduled course or meeting reconstructed from the rendered week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub date: NaiveDate,
    /// Verbatim `HH:MM` strings from the page. Celcat zero-pads them, so
    /// lexicographic order is chronological within a day.
    pub start: String,
    pub end: String,
    pub title: String,
    pub room: Option<String>,
    pub teachers: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
