//! Validation applied by front ends before an edit reaches the grid.
//!
//! The grid accepts any score text; these checks are what the entry
//! dialogs enforce on top of it.

use crate::error::{Error, Result};

/// Accept a submitted score only if it is a non-empty integer.
pub fn validate_score(text: &str) -> Result<i64> {
    if text.is_empty() {
        return Err(Error::InvalidScore(text.to_string()));
    }
    text.parse()
        .map_err(|_| Error::InvalidScore(text.to_string()))
}

/// Accept a new user name only if it is non-empty.
pub fn validate_name(text: &str) -> Result<&str> {
    if text.is_empty() {
        return Err(Error::EmptyName);
    }
    Ok(text)
}
