//! Keystroke filtering and display formatting for the numeric form fields.
//!
//! Stored field values are always canonical: digits with an optional decimal
//! point, no grouping separators. Grouping is added only for display.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CalculatorError, Result};

/// Longest accepted term, in characters (caps the term below 1000 years).
pub const TERM_MAX_LEN: usize = 3;

const GROUPING_SEPARATOR: char = ',';

fn field_value_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[1-9][0-9]*(\.[0-9]*)?$|^0\.[0-9]*$|^$").expect("field value pattern is valid")
    })
}

/// Returns true if `s` is a canonical field value (or empty).
pub fn is_field_value(s: &str) -> bool {
    field_value_pattern().is_match(s)
}

/// Commits `raw` if it is a valid field value, otherwise keeps `current`.
pub fn accept_keystroke(current: &str, raw: &str) -> String {
    if is_field_value(raw) {
        raw.to_string()
    } else {
        current.to_string()
    }
}

/// Same as [`accept_keystroke`] with the term length cap applied first.
pub fn accept_term_keystroke(current: &str, raw: &str) -> String {
    if raw.chars().count() > TERM_MAX_LEN {
        return current.to_string();
    }
    accept_keystroke(current, raw)
}

pub fn strip_grouping_separators(s: &str) -> String {
    s.chars().filter(|&c| c != GROUPING_SEPARATOR).collect()
}

/// Groups the integer part of a canonical value in thousands.
///
/// The fractional part, including a trailing decimal point, is kept as typed so
/// that stripping the separators gives back the stored value.
pub fn format_for_display(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let (int_part, frac_part) = match s.find('.') {
        Some(idx) => s.split_at(idx),
        None => (s, ""),
    };

    if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
        return s.to_string();
    }

    let mut out = group_digits(int_part);
    out.push_str(frac_part);
    out
}

/// Rounds a computed figure to whole units and groups it for display.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.0}", value.round());
    match rounded.strip_prefix('-') {
        Some(digits) if digits != "0" => format!("-{}", group_digits(digits)),
        Some(_) => "0".to_string(),
        None => group_digits(&rounded),
    }
}

/// Parses a stored field value into a number.
pub fn parse_field(field: &'static str, s: &str) -> Result<f64> {
    s.parse::<f64>().map_err(|_| CalculatorError::InvalidNumber {
        field,
        value: s.to_string(),
    })
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUPING_SEPARATOR);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_grammar_matches() {
        for s in ["", "0.", "0.5", "1", "10", "1000.", "1234.567", "99"] {
            assert_eq!(accept_keystroke("7", s), s, "expected {s:?} to be accepted");
        }
    }

    #[test]
    fn rejects_non_matches() {
        for s in ["0", "00", "01", ".5", "1..", "1.2.3", "1a", "-1", " 1", "1,000", "abc"] {
            assert_eq!(accept_keystroke("7", s), "7", "expected {s:?} to be rejected");
        }
    }

    #[test]
    fn term_is_capped_at_three_characters() {
        assert_eq!(accept_term_keystroke("100", "1000"), "100");
        assert_eq!(accept_term_keystroke("99", "999"), "999");
        assert_eq!(accept_term_keystroke("2.", "2.5"), "2.5");
        assert_eq!(accept_term_keystroke("2.5", "2.55"), "2.5");
    }

    #[test]
    fn strips_separators() {
        assert_eq!(strip_grouping_separators("1,000,000.5"), "1000000.5");
        assert_eq!(strip_grouping_separators(""), "");
    }

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_for_display(""), "");
        assert_eq!(format_for_display("1"), "1");
        assert_eq!(format_for_display("999"), "999");
        assert_eq!(format_for_display("1000"), "1,000");
        assert_eq!(format_for_display("200000"), "200,000");
        assert_eq!(format_for_display("1234567.89"), "1,234,567.89");
        assert_eq!(format_for_display("0.25"), "0.25");
        assert_eq!(format_for_display("1000."), "1,000.");
    }

    #[test]
    fn display_round_trips() {
        for v in ["", "0.", "0.75", "5", "1000", "12345.", "987654321.0"] {
            assert_eq!(strip_grouping_separators(&format_for_display(v)), v);
        }
    }

    #[test]
    fn formats_amounts_rounded() {
        assert_eq!(format_amount(1198.4954), "1,198");
        assert_eq!(format_amount(359548.63), "359,549");
        assert_eq!(format_amount(875.0), "875");
        assert_eq!(format_amount(0.4), "0");
        assert_eq!(format_amount(-0.4), "0");
        assert_eq!(format_amount(-1500.0), "-1,500");
    }

    #[test]
    fn parse_field_reports_field_name() {
        assert_eq!(parse_field("rate", "5.25").unwrap(), 5.25);
        match parse_field("amount", "") {
            Err(CalculatorError::InvalidNumber { field, value }) => {
                assert_eq!(field, "amount");
                assert_eq!(value, "");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
