//! Rejection reasons for user input.

use thiserror::Error;

/// User input that was rejected before any mutation happened.
///
/// Validation errors never change the configuration and never touch the
/// persisted document; they are meant to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The domain name was empty after trimming whitespace.
    #[error("Input a domain name")]
    EmptyName,

    /// A domain with the same name is already registered.
    #[error("Duplicate domain name '{0}'")]
    DuplicateName(String),

    /// The name contains characters other than ASCII letters, digits and `-`.
    #[error("Domain name '{0}' cannot contain invalid characters (allowed: a-z, A-Z, 0-9, -)")]
    InvalidCharacters(String),

    /// The update interval is outside the allowed range.
    #[error("Interval must be between 1 and 60 minutes, got {0}")]
    IntervalOutOfRange(i64),
}
