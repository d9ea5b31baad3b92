use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

// A plain substring search would also take "20240115" or "12024" as 2024;
// dates and longer numbers are not plan years here.
static PLAN_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(20\d{2})(?:\D|$)").unwrap());

static ANY_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)((?:19|20)\d{2})(?:\D|$)").unwrap());

/// Find the first planning year (20xx) in a cell.
///
/// The four digits must not be part of a longer number, so "120245" is not a
/// year but "2024-2025" and "år 2026 (prel.)" are.
pub fn extract_year(s: &str) -> Option<String> {
    PLAN_YEAR
        .captures(s)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether a cell contains something that looks like a year (19xx or 20xx).
pub fn contains_year(s: &str) -> bool {
    ANY_YEAR.is_match(s)
}

/// Parse a cost cell into an amount.
///
/// Everything except digits, commas and periods is dropped, then the Swedish
/// decimal comma becomes a period:
/// - "15 000 kr" -> 15000
/// - "1 234,50" -> 1234.50
/// - "ca 40 tkr" -> 40
/// - "ca. 5000" -> 0.5 (the abbreviation's period is kept)
/// - "abc", "", "-" -> None
///
/// Thousands separators written with periods ("1.234.000") do not parse, and
/// neither do amounts beyond the `Decimal` range.
pub fn parse_cost(s: &str) -> Option<Decimal> {
    let mut digits: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if digits.starts_with('.') {
        digits.insert(0, '0');
    }

    Decimal::from_str(&digits).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_year_with_suffix() {
        assert_eq!(extract_year("2024 planerat").as_deref(), Some("2024"));
    }

    #[test]
    fn test_year_first_of_range() {
        assert_eq!(extract_year("2024-2025").as_deref(), Some("2024"));
    }

    #[test]
    fn test_year_inside_text() {
        assert_eq!(extract_year("år 2026 (prel.)").as_deref(), Some("2026"));
    }

    #[test]
    fn test_year_not_part_of_longer_number() {
        assert!(extract_year("120245").is_none());
        assert!(extract_year("20245 kr").is_none());
    }

    #[test]
    fn test_old_year_not_plan_year() {
        assert!(extract_year("1998").is_none());
        assert!(contains_year("1998"));
    }

    #[test]
    fn test_no_year() {
        assert!(extract_year("löpande").is_none());
        assert!(extract_year("").is_none());
        assert!(!contains_year("Tak"));
    }

    #[test]
    fn test_cost_with_spaces_and_currency() {
        assert_eq!(parse_cost("15 000 kr"), Some(dec!(15000)));
    }

    #[test]
    fn test_cost_decimal_comma() {
        assert_eq!(parse_cost("1 234,50 kr"), Some(dec!(1234.50)));
    }

    #[test]
    fn test_cost_plain() {
        assert_eq!(parse_cost("5000"), Some(dec!(5000)));
    }

    #[test]
    fn test_cost_zero_is_some() {
        assert_eq!(parse_cost("0 kr"), Some(dec!(0)));
    }

    #[test]
    fn test_cost_unparseable() {
        assert!(parse_cost("abc").is_none());
        assert!(parse_cost("").is_none());
        assert!(parse_cost("-").is_none());
        assert!(parse_cost("1.234.000").is_none());
    }

    #[test]
    fn test_cost_leading_period() {
        assert_eq!(parse_cost("ca. 5000"), Some(dec!(0.5)));
        assert_eq!(parse_cost(".75"), Some(dec!(0.75)));
    }

    #[test]
    fn test_cost_decimal_range_edge() {
        assert_eq!(
            parse_cost("79228162514264337593543950335 kr"),
            Some(Decimal::MAX)
        );
        assert!(parse_cost("792281625142643375935439503350 kr").is_none());
    }

    #[test]
    fn test_year_inside_date_or_longer_number_rejected() {
        assert!(extract_year("20240115").is_none());
        assert!(extract_year("12024").is_none());
    }
}
