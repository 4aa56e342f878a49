pub mod chunks;
pub mod event;
pub mod extract;
pub mod lines;
pub mod locale;

use chrono::NaiveDate;
use regex::Regex;

pub use event::Event;

/// Room marker of the known deployment: the building prefix rooms are
/// listed under.
pub const DEFAULT_ROOM_MARKER: &str = "CUVIER";

/// Category keywords the known deployment puts at the start of a line.
pub const DEFAULT_KIND_KEYWORDS: &[&str] = &["réunion"];

/// Site-specific heuristic knobs. Celcat deployments differ in the building
/// prefix used for rooms and in the category words worth recognizing, so
/// both are data rather than hard-coded patterns.
pub struct Profile {
    pub room_marker: String,
    pub(crate) room_strict: Regex,
    pub(crate) room_loose: Regex,
    pub(crate) kind_starts: Vec<Regex>,
}

impl Profile {
    pub fn new(room_marker: &str, kind_keywords: &[&str]) -> Self {
        let escaped = regex::escape(room_marker);
        let room_strict = Regex::new(&format!(r"(?i){escaped}[\s\-–—][^,;|\n]+")).unwrap();
        let room_loose = Regex::new(&format!(r"(?i){escaped}")).unwrap();
        let kind_starts = kind_keywords
            .iter()
            .map(|kw| {
                Regex::new(&format!(r"(?i)^(?:type\s*:\s*)?{}\b", regex::escape(kw))).unwrap()
            })
            .collect();
        Self {
            room_marker: room_marker.to_string(),
            room_strict,
            room_loose,
            kind_starts,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new(DEFAULT_ROOM_MARKER, DEFAULT_KIND_KEYWORDS)
    }
}

/// Parse one rendered week into events: normalize → segment into
/// date-anchored chunks → extract fields per chunk. Extraction is
/// best-effort by contract: lines that fail every heuristic are dropped,
/// malformed content never aborts the pass.
pub fn parse_week(text: &str, profile: &Profile) -> Vec<Event> {
    let lines = lines::normalize(text);
    chunks::scan(&lines)
        .into_iter()
        .map(|chunk| {
            let fields = extract::extract_all(&chunk, profile);
            Event {
                date: chunk.date,
                start: chunk.start,
                end: chunk.end,
                title: fields.title,
                room: fields.room,
                teachers: fields.teachers,
                kind: fields.kind,
            }
        })
        .collect()
}

/// Keep only `target`'s events, ordered by start time. The sort is stable,
/// so same-start events keep their textual order.
pub fn select_day(events: &[Event], target: NaiveDate) -> Vec<Event> {
    let mut day: Vec<Event> = events.iter().filter(|e| e.date == target).cloned().collect();
    day.sort_by(|a, b| a.start.cmp(&b.start));
    day
}
