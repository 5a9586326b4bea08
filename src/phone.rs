//! Phone number comparison and cleanup
//!
//! Numbers arrive from several providers, some with a `+<country code>`
//! prefix and some without. Equivalence is decided on digits only, with a
//! 1-3 digit country-code allowance when exactly one side is prefixed.

/// Numbers with fewer digits than this are not dialable
pub const MIN_PHONE_DIGITS: usize = 7;

const MAX_COUNTRY_CODE_DIGITS: usize = 3;

/// Keep only ASCII digits
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Whether the number carries an international `+` marker
fn has_country_code(raw: &str) -> bool {
    raw.trim_start().starts_with('+')
}

/// Normalize a raw number to `+digits` / `digits`.
///
/// Returns None when fewer than [`MIN_PHONE_DIGITS`] digits remain.
pub fn clean_number(raw: &str) -> Option<String> {
    let digits = digits_only(raw);
    if digits.len() < MIN_PHONE_DIGITS {
        return None;
    }
    if has_country_code(raw) {
        Some(format!("+{}", digits))
    } else {
        Some(digits)
    }
}

/// Decide whether two raw numbers denote the same line.
pub fn is_same_number(a: &str, b: &str) -> bool {
    let digits_a = digits_only(a);
    let digits_b = digits_only(b);
    if digits_a.is_empty() || digits_b.is_empty() {
        return false;
    }
    if digits_a == digits_b {
        return true;
    }

    let (with_code, without_code) = match (has_country_code(a), has_country_code(b)) {
        (true, false) => (digits_a, digits_b),
        (false, true) => (digits_b, digits_a),
        _ => return false,
    };

    (1..=MAX_COUNTRY_CODE_DIGITS).any(|code_len| {
        with_code.len() > code_len && with_code[code_len..] == without_code[..]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_country_code_is_optional() {
        let numbers = ["+14155550123", "4155550123"];
        assert!(is_same_number(numbers[0], numbers[1]));
        assert!(is_same_number(numbers[1], numbers[0]));
    }

    #[test]
    fn test_formatting_is_ignored() {
        assert!(is_same_number("(415) 555-0123", "415.555.0123"));
        assert!(is_same_number("+44 20 7946 0958", "+442079460958"));
    }

    #[test]
    fn test_three_digit_country_code() {
        assert!(is_same_number("+353 87 123 4567", "871234567"));
    }

    #[test]
    fn test_four_digit_prefix_is_not_a_country_code() {
        assert!(!is_same_number("+12345550123", "5550123"));
    }

    #[test]
    fn test_both_prefixed_and_different() {
        assert!(!is_same_number("+14155550123", "+4155550123"));
    }

    #[test]
    fn test_neither_prefixed_and_different() {
        assert!(!is_same_number("14155550123", "4155550123"));
    }

    #[test]
    fn test_empty_numbers_never_match() {
        assert!(!is_same_number("", ""));
        assert!(!is_same_number("+", "abc"));
    }

    #[test]
    fn test_clean_number() {
        assert_eq!(clean_number("+1 (415) 555-0123"), Some("+14155550123".to_string()));
        assert_eq!(clean_number("415-555-0123"), Some("4155550123".to_string()));
        assert_eq!(clean_number("12345"), None);
        assert_eq!(clean_number("+1 23 45"), None);
        assert_eq!(clean_number("1234567"), Some("1234567".to_string()));
    }

    proptest! {
        #[test]
        fn prop_clean_number_is_idempotent(raw in "[+]?[0-9 ()-]{0,20}") {
            if let Some(once) = clean_number(&raw) {
                prop_assert_eq!(clean_number(&once), Some(once.clone()));
            }
        }

        #[test]
        fn prop_same_number_is_symmetric(a in "[+]?[0-9]{1,12}", b in "[+]?[0-9]{1,12}") {
            prop_assert_eq!(is_same_number(&a, &b), is_same_number(&b, &a));
        }

        #[test]
        fn prop_number_matches_itself_with_code(code in "[1-9][0-9]{0,2}", local in "[0-9]{7,10}") {
            let international = format!("+{}{}", code, local);
            prop_assert!(is_same_number(&international, &local));
        }
    }
}
