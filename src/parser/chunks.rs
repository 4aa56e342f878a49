use chrono::NaiveDate;

use super::lines;

/// A time-anchored run of lines, segmented out of the normalized stream.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Date anchor in effect when the time range was matched.
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    /// Trailing text on the time-range line itself.
    pub after_time: String,
    /// Lines after the time-range line, up to the next boundary (exclusive).
    pub body: Vec<String>,
}

/// Date context while scanning. A time range seen in `Pending` has no
/// calendar meaning and is dropped.
enum Anchor {
    Pending,
    Active(NaiveDate),
}

/// Single pass over the normalized week: full-date lines move the anchor,
/// time-range lines open a chunk, everything else is noise. The line that
/// terminates a chunk is not consumed; it starts the next iteration.
pub fn scan(lines: &[String]) -> Vec<Chunk> {
    let mut anchor = Anchor::Pending;
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];

        if let Some(date) = lines::parse_full_date(line) {
            anchor = Anchor::Active(date);
            i += 1;
            continue;
        }

        if let Some(m) = lines::find_time_range(line) {
            if let Anchor::Active(date) = anchor {
                let after_time = line[m.end_offset..].trim().to_string();

                let mut body = Vec::new();
                let mut j = i + 1;
                while j < lines.len() && !is_boundary(&lines[j]) {
                    body.push(lines[j].clone());
                    j += 1;
                }

                chunks.push(Chunk {
                    date,
                    start: m.start,
                    end: m.end,
                    after_time,
                    body,
                });
                i = j;
                continue;
            }
        }

        i += 1;
    }

    chunks
}

fn is_boundary(line: &str) -> bool {
    lines::find_time_range(line).is_some()
        || lines::parse_full_date(line).is_some()
        || lines::is_weekday_header(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn time_range_before_any_anchor_is_dropped() {
        let chunks = scan(&norm(&["09:00-10:30", "Algorithmique", "15 mars 2025"]));
        assert!(chunks.is_empty());
    }

    #[test]
    fn anchor_scopes_to_nearest_preceding_date() {
        let chunks = scan(&norm(&[
            "15 mars 2025",
            "09:00-10:30",
            "Cours A",
            "16 mars 2025",
            "11:00-12:00",
            "Cours B",
        ]));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].date, d(2025, 3, 15));
        assert_eq!(chunks[1].date, d(2025, 3, 16));
    }

    #[test]
    fn consecutive_time_ranges_split_cleanly() {
        let chunks = scan(&norm(&[
            "15 mars 2025",
            "09:00-10:30",
            "Cours A",
            "10:45-12:15",
            "Cours B",
        ]));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].body, vec!["Cours A"]);
        assert_eq!(chunks[1].body, vec!["Cours B"]);
    }

    #[test]
    fn weekday_header_ends_a_chunk() {
        let chunks = scan(&norm(&[
            "15 mars 2025",
            "09:00-10:30",
            "Cours A",
            "Mardi",
            "Texte hors bloc",
        ]));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].body, vec!["Cours A"]);
    }

    #[test]
    fn date_line_ends_a_chunk_and_reanchors() {
        let chunks = scan(&norm(&[
            "15 mars 2025",
            "09:00-10:30",
            "Cours A",
            "16 mars 2025",
            "09:00-10:30",
        ]));
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].body, vec!["Cours A"]);
        assert_eq!(chunks[1].date, d(2025, 3, 16));
        assert!(chunks[1].body.is_empty());
    }

    #[test]
    fn after_time_text_is_captured() {
        let chunks = scan(&norm(&["15 mars 2025", "09:00-10:30 CUVIER-B204", "Cours A"]));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].after_time, "CUVIER-B204");
        assert_eq!(chunks[0].start, "09:00");
        assert_eq!(chunks[0].end, "10:30");
    }

    #[test]
    fn empty_chunk_at_end_of_input() {
        let chunks = scan(&norm(&["15 mars 2025", "09:00-10:30"]));
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].body.is_empty());
        assert!(chunks[0].after_time.is_empty());
    }
}
