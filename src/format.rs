/// Compact display form: `1234` -> `"1.2k"`, smaller values unchanged.
///
/// Halves round up (`1250` -> `"1.3k"`).
pub fn format_number(n: u64) -> String {
    if n >= 1000 {
        let tenths = n.saturating_add(50) / 100;
        format!("{}.{}k", tenths / 10, tenths % 10)
    } else {
        n.to_string()
    }
}

/// Up to two upper-cased initials taken from the words of `name`.
pub fn initials(name: &str) -> String {
    let out: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if out.is_empty() { "?".to_string() } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_below_a_thousand_are_plain() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
    }

    #[test]
    fn thousands_get_one_decimal_and_k() {
        assert_eq!(format_number(1000), "1.0k");
        assert_eq!(format_number(1247), "1.2k");
        assert_eq!(format_number(15_960), "16.0k");
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(format_number(1050), "1.1k");
        assert_eq!(format_number(1250), "1.3k");
        assert_eq!(format_number(1750), "1.8k");
        assert_eq!(format_number(3250), "3.3k");
        assert_eq!(format_number(999_950), "1000.0k");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Mona Lisa Octocat"), "ML");
        assert_eq!(initials("dinesh"), "D");
        assert_eq!(initials("(Mona) <Lisa>"), "ML");
        assert_eq!(initials("   "), "?");
    }
}
