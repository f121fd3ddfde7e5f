//! Form validation errors and input coercion helpers.
//!
//! Form fields arrive as raw strings from the UI. Numeric fields are coerced
//! rather than rejected where a sensible value can be recovered.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Validation errors raised by form submission.
///
/// A failed validation never mutates any store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in the required field: {0}")]
    Required(&'static str),

    #[error("Invalid age: {0}")]
    InvalidAge(String),

    #[error("Invalid gender: {0}")]
    InvalidGender(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Unknown patient: {0}")]
    UnknownPatient(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Require a non-blank field, returning it trimmed.
pub fn require<'a>(value: &'a str, field: &'static str) -> ValidationResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(trimmed)
    }
}

/// Coerce an age input to a positive integer.
///
/// Takes the leading run of digits, so `"40.7"` and `"12 years"` are accepted.
pub fn coerce_age(input: &str) -> ValidationResult<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required("age"));
    }

    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ValidationError::InvalidAge(trimmed.to_string()));
    }

    match digits.parse::<u32>() {
        Ok(0) | Err(_) => Err(ValidationError::InvalidAge(trimmed.to_string())),
        Ok(age) => Ok(age),
    }
}

/// Keep only the characters an amount field accepts (digits and `.`).
pub fn filter_amount_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Parse an amount input into a non-negative decimal.
///
/// The input is filtered first, then the longest valid decimal prefix is used
/// (`"1.2.3"` parses as `1.2`).
pub fn coerce_amount(input: &str) -> ValidationResult<Decimal> {
    let filtered = filter_amount_input(input);
    if filtered.is_empty() {
        return Err(ValidationError::Required("amount"));
    }

    let prefix = match filtered.match_indices('.').nth(1) {
        Some((second_dot, _)) => &filtered[..second_dot],
        None => filtered.as_str(),
    };

    if !prefix.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidAmount(input.to_string()));
    }

    let normalized = if prefix.starts_with('.') {
        format!("0{}", prefix)
    } else {
        prefix.trim_end_matches('.').to_string()
    };

    Decimal::from_str(&normalized).map_err(|_| ValidationError::InvalidAmount(input.to_string()))
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// Parse a clinic time slot, either `"10:00 AM"` or 24h `"14:30"`.
pub fn parse_time(input: &str) -> ValidationResult<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(&trimmed.to_uppercase(), "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ValidationError::InvalidTime(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require("  Ann ", "name"), Ok("Ann"));
        assert_eq!(require("   ", "name"), Err(ValidationError::Required("name")));
    }

    #[test]
    fn test_coerce_age() {
        assert_eq!(coerce_age("40"), Ok(40));
        assert_eq!(coerce_age(" 40.7"), Ok(40));
        assert_eq!(coerce_age("12 years"), Ok(12));
        assert_eq!(coerce_age(""), Err(ValidationError::Required("age")));
        assert!(matches!(coerce_age("abc"), Err(ValidationError::InvalidAge(_))));
        assert!(matches!(coerce_age("0"), Err(ValidationError::InvalidAge(_))));
        assert!(matches!(
            coerce_age("99999999999"),
            Err(ValidationError::InvalidAge(_))
        ));
    }

    #[test]
    fn test_filter_amount_input() {
        assert_eq!(filter_amount_input("$1,234.50"), "1234.50");
        assert_eq!(filter_amount_input("abc"), "");
    }

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount("75.50"), Ok(Decimal::new(7550, 2)));
        assert_eq!(coerce_amount("1.2.3"), Ok(Decimal::new(12, 1)));
        assert_eq!(coerce_amount(".5"), Ok(Decimal::new(5, 1)));
        assert_eq!(coerce_amount("10."), Ok(Decimal::new(10, 0)));
        assert_eq!(coerce_amount("-20"), Ok(Decimal::new(20, 0)));
        assert_eq!(coerce_amount(""), Err(ValidationError::Required("amount")));
        assert!(matches!(coerce_amount("."), Err(ValidationError::InvalidAmount(_))));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-01"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
        assert!(parse_date("02/01/2024").is_err());
    }

    #[test]
    fn test_parse_time() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(parse_time("10:00 AM"), Ok(ten));
        assert_eq!(parse_time("10:00 am"), Ok(ten));
        assert_eq!(parse_time("14:30"), Ok(NaiveTime::from_hms_opt(14, 30, 0).unwrap()));
        assert!(parse_time("noon").is_err());
    }
}
