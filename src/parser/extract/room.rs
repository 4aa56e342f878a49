use crate::parser::Profile;

/// Room mentions follow the site convention `<MARKER><sep><free text>`, e.g.
/// `CUVIER-B204` or `CUVIER Amphi 1`. Matches run to the first of `,;|` or
/// end of line. When the strict pattern misses but the marker is present,
/// everything from the marker to the first delimiter is taken as a loose
/// match. Values are deduplicated case-insensitively, first seen wins.
pub fn extract(lines: &[&str], profile: &Profile) -> Option<String> {
    let mut rooms: Vec<String> = Vec::new();

    for line in lines {
        let mut matches: Vec<String> = profile
            .room_strict
            .find_iter(line)
            .map(|m| m.as_str().to_string())
            .collect();

        if matches.is_empty() {
            if let Some(m) = profile.room_loose.find(line) {
                let tail = &line[m.start()..];
                let cut = tail.split([',', ';', '|']).next().unwrap_or(tail);
                matches.push(cut.to_string());
            }
        }

        for m in matches {
            let v = m.trim().trim_end_matches([' ', ',', ';', '|']).to_string();
            if !v.is_empty() && !rooms.iter().any(|r| r.to_lowercase() == v.to_lowercase()) {
                rooms.push(v);
            }
        }
    }

    if rooms.is_empty() {
        None
    } else {
        Some(rooms.join(", "))
    }
}
