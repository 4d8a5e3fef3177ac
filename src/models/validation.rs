//! Shared field validators for request bodies

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static ISBN_CHARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9][0-9 -]*[0-9]$").unwrap());

/// Validate an ISBN-13, hyphens and spaces allowed (e.g. 978-3-16-148410-0)
pub fn validate_isbn13(value: &str) -> Result<(), ValidationError> {
    if !ISBN_CHARS_RE.is_match(value) {
        return Err(ValidationError::new("isbn"));
    }

    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 13 {
        return Err(ValidationError::new("isbn"));
    }
    if !(digits.starts_with(&[9, 7, 8]) || digits.starts_with(&[9, 7, 9])) {
        return Err(ValidationError::new("isbn"));
    }

    // Weighted checksum over all 13 digits must be divisible by 10
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { *d * 3 })
        .sum();
    if sum % 10 != 0 {
        return Err(ValidationError::new("isbn"));
    }

    Ok(())
}

/// Validate a calendar date in ISO 8601 form (YYYY-MM-DD)
pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("iso_date"))
}

/// Convert a Rust field name to its wire (camelCase) form
pub fn snake_to_camel(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
