//! Renderer-bound text normalization
//!
//! The renderer's base fonts cannot be assumed to cover Turkish letters, so
//! every string headed for a page goes through [`normalize`] first. Text the
//! user edits, or that answers are compared against, is never normalized.

/// One-to-one substitutions, case preserved
const SUBSTITUTIONS: &[(char, char)] = &[
    ('İ', 'I'),
    ('ı', 'i'),
    ('Ş', 'S'),
    ('ş', 's'),
    ('Ğ', 'G'),
    ('ğ', 'g'),
    ('Ü', 'U'),
    ('ü', 'u'),
    ('Ö', 'O'),
    ('ö', 'o'),
    ('Ç', 'C'),
    ('ç', 'c'),
    ('Â', 'A'),
    ('â', 'a'),
    ('Î', 'I'),
    ('î', 'i'),
    ('Û', 'U'),
    ('û', 'u'),
];

/// The ASCII stand-in for `ch`, or `ch` itself when it has none
pub fn substitute(ch: char) -> char {
    if ch.is_ascii() {
        return ch;
    }
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
        .unwrap_or(ch)
}

/// Whether [`normalize`] would change `text`
pub fn needs_normalization(text: &str) -> bool {
    text.chars().any(|ch| substitute(ch) != ch)
}

/// Replace characters outside the renderer's repertoire with ASCII letters.
///
/// Total and idempotent; characters without a substitution pass through.
pub fn normalize(text: &str) -> String {
    text.chars().map(substitute).collect()
}

/// [`normalize`] for optional text; `None` becomes the empty string
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_turkish_sample() {
        assert_eq!(normalize("İstanbul ağacı"), "Istanbul agaci");
        assert_eq!(normalize("ŞEKER çiğköfte ÖĞÜ"), "SEKER cigkofte OGU");
    }

    #[test]
    fn test_ascii_untouched() {
        let text = "Plain ASCII, with punctuation! 123";
        assert_eq!(normalize(text), text);
        assert!(!needs_normalization(text));
    }

    #[test]
    fn test_unmapped_characters_pass_through() {
        assert_eq!(normalize("café €"), "café €");
    }

    #[test]
    fn test_missing_text_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize_opt(Some("şu")), "su");
    }

    #[test]
    fn test_table_targets_are_ascii() {
        for (from, to) in SUBSTITUTIONS {
            assert!(!from.is_ascii());
            assert!(to.is_ascii_alphabetic());
        }
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(text in "\\PC*") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert!(!needs_normalization(&once));
        }

        #[test]
        fn prop_normalize_keeps_char_count(text in "[a-zçğıöşüİÇĞÖŞÜ ]*") {
            prop_assert_eq!(normalize(&text).chars().count(), text.chars().count());
        }
    }
}
