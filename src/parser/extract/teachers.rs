use std::sync::LazyLock;

use regex::Regex;

static NAME_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-ZÉÈÀÂÇÎÏÔÛÜ][A-Za-zÉÈÀÂÇÎÏÔÛÜéèàâçïîôöûü'’\-]{2,}$").unwrap()
});
static SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,\s]+").unwrap());

/// A name list needs a comma and at least two proper-name-shaped tokens:
/// uppercase initial (accented included), then two or more letters,
/// apostrophes or hyphens.
pub fn is_name_list(line: &str) -> bool {
    if !line.contains(',') {
        return false;
    }
    let caps_like = SPLIT_RE
        .split(line)
        .filter(|t| !t.is_empty())
        .filter(|t| NAME_WORD_RE.is_match(t))
        .count();
    caps_like >= 2
}

/// First line of the chunk that reads as a comma-separated list of people.
pub fn extract(body: &[&str]) -> Option<String> {
    body.iter().find(|l| is_name_list(l)).map(|l| (*l).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_pair() {
        assert!(is_name_list("Dupont, Martin"));
    }

    #[test]
    fn accented_names() {
        assert!(is_name_list("Éluard, Çelik"));
        assert!(is_name_list("D'Arcy, Saint-Exupéry"));
    }

    #[test]
    fn comma_required() {
        assert!(!is_name_list("Dupont Martin"));
    }

    #[test]
    fn two_name_tokens_required() {
        assert!(!is_name_list("Dupont,"));
        assert!(!is_name_list("hello, world"));
        assert!(!is_name_list("B204, salle"));
    }

    #[test]
    fn first_matching_line_wins() {
        let body = ["Algorithmique", "Dupont, Martin", "Durand, Petit"];
        assert_eq!(extract(&body).as_deref(), Some("Dupont, Martin"));
    }

    #[test]
    fn no_name_list() {
        assert!(extract(&["Algorithmique", "CUVIER-B204"]).is_none());
        assert!(extract(&[]).is_none());
    }
}
