/// The reference table's city column holds at most this many characters.
const MAX_CITY_LEN: usize = 120;

/// U+FFFD as it appears after a Latin-1 round trip of UTF-8 bytes. Stripping
/// it is best-effort cleanup of a known upstream mis-decode, not a general
/// encoding repair.
const MOJIBAKE: &str = "ÔøΩ";

/// Collapse whitespace runs, bound the length, strip replacement-character
/// debris. Returns `None` when nothing usable is left so the caller can
/// serialize a NULL instead of an empty string literal.
pub fn clean_city(raw: &str) -> Option<String> {
    let mut city = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if city.chars().count() > MAX_CITY_LEN {
        city = city.chars().take(MAX_CITY_LEN - 3).collect();
        city.push_str("...");
    }

    city = city.replace(MOJIBAKE, "").replace('\u{FFFD}', "");

    if city.is_empty() {
        None
    } else {
        Some(city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            clean_city("  Kuala   Lumpur  "),
            Some("Kuala Lumpur".to_string())
        );
        assert_eq!(
            clean_city("Batu\t\tFerringhi"),
            Some("Batu Ferringhi".to_string())
        );
    }

    #[test]
    fn blank_input_becomes_none() {
        assert_eq!(clean_city(""), None);
        assert_eq!(clean_city("   "), None);
        assert_eq!(clean_city("ÔøΩ"), None);
    }

    #[test]
    fn long_names_truncate_with_ellipsis() {
        let long = "x".repeat(130);
        let cleaned = clean_city(&long).unwrap();
        assert_eq!(cleaned.chars().count(), MAX_CITY_LEN);
        assert!(cleaned.ends_with("..."));

        // 120 chars exactly is left alone
        let exact = "y".repeat(120);
        assert_eq!(clean_city(&exact), Some(exact));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let long = "ü".repeat(130);
        let cleaned = clean_city(&long).unwrap();
        assert_eq!(cleaned.chars().count(), MAX_CITY_LEN);
    }

    #[test]
    fn strips_mojibake_sequence() {
        assert_eq!(
            clean_city("KampungÔøΩ Baru"),
            Some("Kampung Baru".to_string())
        );
        assert_eq!(clean_city("Alor\u{FFFD} Setar"), Some("Alor Setar".to_string()));
    }
}
