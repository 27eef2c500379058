//! Form field parsing and ISBN checks.
//!
//! Every helper takes the raw form value as submitted and returns either the
//! typed value or an `AppError::Validation` naming the offending field.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Date format accepted by the author form
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a required `YYYY-MM-DD` date
pub fn parse_date(field: &str, value: Option<&str>) -> AppResult<NaiveDate> {
    let raw = present(value).ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        AppError::Validation(format!("{} must be a date in YYYY-MM-DD format, got '{}'", field, raw))
    })
}

/// Parse an optional `YYYY-MM-DD` date; blank counts as absent
pub fn parse_optional_date(field: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match present(value) {
        Some(raw) => parse_date(field, Some(raw)).map(Some),
        None => Ok(None),
    }
}

/// Parse a required integer field
pub fn parse_integer(field: &str, value: Option<&str>) -> AppResult<i64> {
    let raw = present(value).ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("{} must be an integer, got '{}'", field, raw)))
}

/// Parse an optional integer field; blank counts as absent
pub fn parse_optional_integer(field: &str, value: Option<&str>) -> AppResult<Option<i64>> {
    match present(value) {
        Some(raw) => parse_integer(field, Some(raw)).map(Some),
        None => Ok(None),
    }
}

/// Validate an ISBN-10 or ISBN-13 and return it without hyphens or spaces
pub fn normalize_isbn(value: &str) -> AppResult<String> {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    // An all-zero body passes the mod 11 arithmetic but is never assigned.
    let blank = cleaned.chars().all(|c| c == '0');
    let valid = !blank
        && match cleaned.len() {
            10 => is_valid_isbn10(&cleaned),
            13 => (cleaned.starts_with("978") || cleaned.starts_with("979")) && is_valid_isbn13(&cleaned),
            _ => false,
        };

    if valid {
        Ok(cleaned)
    } else {
        Err(AppError::Validation(format!("'{}' is not a valid ISBN-10 or ISBN-13", value.trim())))
    }
}

fn is_valid_isbn10(value: &str) -> bool {
    let mut sum = 0;
    for (index, ch) in value.chars().enumerate() {
        let digit = match ch {
            'X' if index == 9 => 10,
            _ => match ch.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += digit * (10 - index as u32);
    }
    sum % 11 == 0
}

fn is_valid_isbn13(value: &str) -> bool {
    let mut sum = 0;
    for (index, ch) in value.chars().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        sum += if index % 2 == 0 { digit } else { digit * 3 };
    }
    sum % 10 == 0
}
