//! Input provider helpers
//!
//! Turns raw user text into the numeric start inputs the engine expects.
//! Anything that does not begin with a number counts as 0, which the engine
//! then rejects.

use serde::{Deserialize, Serialize};

use crate::engine::plan::effective_message;

/// Start inputs after raw text has been parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartInputs {
    pub hours: f64,
    pub warning_minutes: f64,
    pub message: String,
}

impl StartInputs {
    pub fn new(hours: f64, warning_minutes: f64, message: impl Into<String>) -> Self {
        Self {
            hours,
            warning_minutes,
            message: message.into(),
        }
    }

    /// Build inputs from form-style text fields
    pub fn from_raw(hours: &str, warning_minutes: &str, message: &str) -> Self {
        Self::new(
            parse_number(hours),
            parse_number(warning_minutes),
            effective_message(message),
        )
    }
}

/// Leniently parse the leading decimal literal of `raw`.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `" 1.5h"`
/// is 1.5. Text without a numeric prefix, or whose value is not finite,
/// yields 0.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when it has at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match trimmed[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DEFAULT_WARNING_MESSAGE;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_number("2"), 2.0);
        assert_eq!(parse_number("1.5"), 1.5);
        assert_eq!(parse_number("-3"), -3.0);
        assert_eq!(parse_number(".25"), 0.25);
        assert_eq!(parse_number("4."), 4.0);
        assert_eq!(parse_number("1e2"), 100.0);
    }

    #[test]
    fn takes_leading_prefix() {
        assert_eq!(parse_number("  1.5 hours"), 1.5);
        assert_eq!(parse_number("10min"), 10.0);
        assert_eq!(parse_number("2e"), 2.0);
        assert_eq!(parse_number("3.2.1"), 3.2);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("-"), 0.0);
        assert_eq!(parse_number("."), 0.0);
        assert_eq!(parse_number("1e999"), 0.0);
    }

    #[test]
    fn from_raw_defaults_message() {
        let inputs = StartInputs::from_raw("1", "x", "");
        assert_eq!(inputs.hours, 1.0);
        assert_eq!(inputs.warning_minutes, 0.0);
        assert_eq!(inputs.message, DEFAULT_WARNING_MESSAGE);
    }
}
