//! Name Validation
//!
//! Input rules applied to subject names before a scan is allowed to start.
//! The generator assumes names already passed these checks.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Minimum number of characters in a trimmed name
pub const MIN_NAME_CHARS: usize = 2;

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z\s\-']+$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("{field} name is required")]
    Missing { field: String },

    #[error("{field} name must be at least 2 characters")]
    TooShort { field: String },

    #[error("{field} name can only contain letters, spaces, hyphens, and apostrophes")]
    InvalidCharacters { field: String },
}

/// Validate a single name, returning the trimmed value.
///
/// `field` labels the input in the error message (e.g. "First").
pub fn validate_name(raw: &str, field: &str) -> Result<String, NameError> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(NameError::Missing { field: field.to_string() });
    }
    if value.chars().count() < MIN_NAME_CHARS {
        return Err(NameError::TooShort { field: field.to_string() });
    }
    if !NAME_PATTERN.is_match(value) {
        return Err(NameError::InvalidCharacters { field: field.to_string() });
    }

    Ok(value.to_string())
}

/// Validate both subjects of a pair at once.
pub fn validate_pair(first: &str, second: &str) -> Result<(String, String), NameError> {
    let a = validate_name(first, "First")?;
    let b = validate_name(second, "Second")?;
    Ok((a, b))
}
