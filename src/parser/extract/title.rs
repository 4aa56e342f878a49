use std::sync::LazyLock;

use regex::Regex;

use super::teachers;
use crate::parser::{lines, locale, Profile};

static GROUP_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[ML]\d\b|\bUE\b|\bGP\b").unwrap());

/// Pick the descriptive line of a chunk. First line surviving the skip rules
/// wins; group-code lines are remembered as a fallback but scanning
/// continues past them.
pub fn choose(body: &[&str], room: Option<&str>, kind: Option<&str>, profile: &Profile) -> String {
    let marker_dash = format!("{}-", profile.room_marker);
    let mut fallback: Option<&str> = None;

    for line in body {
        if lines::is_weekday_header(line) {
            continue;
        }
        if room.is_some() && line.contains(&marker_dash) {
            continue;
        }
        if kind.is_some_and(|k| k == *line) {
            continue;
        }
        if teachers::is_name_list(line) {
            continue;
        }
        if GROUP_CODE_RE.is_match(line) {
            fallback.get_or_insert(line);
            continue;
        }
        if line.chars().count() <= 3 {
            continue;
        }
        return (*line).to_string();
    }

    fallback
        .or_else(|| body.first().copied())
        .unwrap_or(locale::FALLBACK_TITLE)
        .to_string()
}
