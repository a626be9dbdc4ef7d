//! Player name validation
//!
//! Names are typed in at the table, so the engine trims them, rejects
//! empty or oversized input, and filters inappropriate content. Unlike a
//! networked lobby there is no uniqueness rule: two players at the same
//! table may enter the same name.

use rustrict::CensorStr;
use serde::Serialize;
use thiserror::Error;

use crate::constants::table::MAX_NAME_LENGTH;

/// Errors that can occur during name validation
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The name is empty or contains only whitespace
    #[error("name cannot be empty")]
    Empty,
    /// The name contains inappropriate content
    #[error("name is inappropriate")]
    Sinful,
    /// The name exceeds the maximum allowed length
    #[error("name is too long")]
    TooLong,
}

/// Validates and cleans a player name
///
/// The name is trimmed of surrounding whitespace before any checks, so an
/// all-whitespace name is rejected as empty rather than stored.
///
/// # Errors
///
/// * [`Error::TooLong`] - name exceeds 30 characters
/// * [`Error::Empty`] - name is empty after trimming whitespace
/// * [`Error::Sinful`] - name contains inappropriate content
pub fn clean_name(name: &str) -> Result<String, Error> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(Error::TooLong);
    }
    let name = rustrict::trim_whitespace(name);
    if name.is_empty() {
        return Err(Error::Empty);
    }
    if name.is_inappropriate() {
        return Err(Error::Sinful);
    }
    Ok(name.to_owned())
}
