use std::sync::LazyLock;

use regex::Regex;

use crate::parser::Profile;

static TYPE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^type\s*:\s*\S+").unwrap());

/// Category annotations trail the chunk, so scan bottom-up. A line qualifies
/// if it starts with a recognized category keyword or carries an explicit
/// `type:` label with content.
pub fn extract(body: &[&str], profile: &Profile) -> Option<String> {
    for line in body.iter().rev() {
        if profile.kind_starts.iter().any(|re| re.is_match(line)) || TYPE_LABEL_RE.is_match(line) {
            return Some((*line).to_string());
        }
    }
    None
}
