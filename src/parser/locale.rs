use std::collections::HashMap;
use std::sync::LazyLock;

/// Month spellings for the two locales the Celcat UI renders date headers in.
/// Keys are lowercase and unaccented; [`fold`] is applied before lookup so the
/// accented French spellings resolve through the same keys.
static MONTHS: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    HashMap::from([
        ("january", 1),
        ("february", 2),
        ("march", 3),
        ("april", 4),
        ("may", 5),
        ("june", 6),
        ("july", 7),
        ("august", 8),
        ("september", 9),
        ("october", 10),
        ("november", 11),
        ("december", 12),
        ("janvier", 1),
        ("fevrier", 2),
        ("mars", 3),
        ("avril", 4),
        ("mai", 5),
        ("juin", 6),
        ("juillet", 7),
        ("aout", 8),
        ("septembre", 9),
        ("octobre", 10),
        ("novembre", 11),
        ("decembre", 12),
    ])
});

const WEEKDAYS: &[&str] = &[
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// French display spellings, indexed by chrono's Monday-based weekday number.
pub const WEEKDAY_DISPLAY_FR: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// French display spellings, indexed by zero-based month.
pub const MONTH_DISPLAY_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin",
    "juillet", "août", "septembre", "octobre", "novembre", "décembre",
];

/// Title used when a chunk has no usable descriptive line.
pub const FALLBACK_TITLE: &str = "Événement";

/// Lowercase and strip the accents French spellings carry.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

pub fn month_number(name: &str) -> Option<u32> {
    MONTHS.get(fold(name).as_str()).copied()
}

/// `true` if `word` is exactly a weekday name in either locale.
pub fn is_weekday_name(word: &str) -> bool {
    WEEKDAYS.contains(&fold(word).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_months_with_and_without_accents() {
        assert_eq!(month_number("mars"), Some(3));
        assert_eq!(month_number("février"), Some(2));
        assert_eq!(month_number("fevrier"), Some(2));
        assert_eq!(month_number("AOÛT"), Some(8));
        assert_eq!(month_number("aout"), Some(8));
        assert_eq!(month_number("décembre"), Some(12));
    }

    #[test]
    fn english_months() {
        assert_eq!(month_number("March"), Some(3));
        assert_eq!(month_number("august"), Some(8));
    }

    #[test]
    fn unknown_month() {
        assert_eq!(month_number("brumaire"), None);
        assert_eq!(month_number(""), None);
    }

    #[test]
    fn fold_lowercases_and_strips_accents() {
        assert_eq!(fold("Décembre"), "decembre");
        assert_eq!(fold("AOÛT"), "aout");
        assert_eq!(fold("plain"), "plain");
    }

    #[test]
    fn weekday_names_both_locales() {
        assert!(is_weekday_name("Lundi"));
        assert!(is_weekday_name("monday"));
        assert!(is_weekday_name("DIMANCHE"));
        assert!(!is_weekday_name("lundi 3 mars"));
        assert!(!is_weekday_name("weekend"));
    }
}
