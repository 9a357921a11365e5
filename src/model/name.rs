//! Provider sub-domain names.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// ASCII letters, digits and hyphen; at least one character.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9-]+$").expect("name pattern is a valid regex"));

/// A validated sub-domain label.
///
/// Only ASCII letters, digits and `-` are allowed, so the name is always safe
/// to place in a URL query without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Validates a name after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyName`] if nothing is left after trimming
    /// - [`ValidationError::InvalidCharacters`] for anything outside `[A-Za-z0-9-]`
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        if !NAME_PATTERN.is_match(name) {
            return Err(ValidationError::InvalidCharacters(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        // Stored names were validated on the way in, so they must not need trimming.
        if raw.trim() != raw {
            return Err(ValidationError::InvalidCharacters(raw));
        }
        Self::new(&raw)
    }
}

impl From<DomainName> for String {
    fn from(name: DomainName) -> Self {
        name.0
    }
}

impl PartialEq<str> for DomainName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DomainName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
