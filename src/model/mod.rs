//! Data model for the persisted configuration document.
//!
//! This module provides:
//! - The configuration document itself ([`Config`])
//! - Individual domain entries ([`Domain`])
//! - Validated value types ([`DomainName`], [`Interval`])
//! - Rejection reasons for user input ([`ValidationError`])
//!
//! Validated types can only hold legal values. The JSON document stores them
//! as a plain string / integer, and a document holding an illegal value fails
//! to deserialize.

mod error;
mod interval;
mod name;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::ValidationError;
pub use interval::Interval;
pub use name::DomainName;

use serde::{Deserialize, Serialize};

/// A single managed domain.
///
/// `name` is the sub-domain label registered with the provider
/// (`myhost` for `myhost.duckdns.org`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Provider sub-domain label.
    pub name: DomainName,

    /// Disabled domains are pushed the null address on every tick.
    pub enabled: bool,
}

impl Domain {
    /// Creates a new, enabled domain.
    #[must_use]
    pub const fn new(name: DomainName) -> Self {
        Self {
            name,
            enabled: true,
        }
    }
}

/// The whole persisted configuration.
///
/// `domains` keeps insertion order, which is also the display order.
/// Names are unique within the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Provider credential, sent verbatim on every update request.
    pub token: String,

    /// Minutes between update cycles.
    pub interval: Interval,

    /// Managed domains, in display order.
    pub domains: Vec<Domain>,
}

impl Default for Config {
    /// The first-run document: no token, 5 minute interval, no domains.
    fn default() -> Self {
        Self {
            token: String::new(),
            interval: Interval::default(),
            domains: Vec::new(),
        }
    }
}

impl Config {
    /// Returns the domain with the given name, if present.
    #[must_use]
    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.name == *name)
    }

    /// Returns true if a domain with this exact (case-sensitive) name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.domain(name).is_some()
    }

    /// Returns the first name that occurs more than once, if any.
    ///
    /// Used to reject hand-edited documents that break name uniqueness.
    #[must_use]
    pub fn first_duplicate(&self) -> Option<&DomainName> {
        self.domains.iter().enumerate().find_map(|(i, d)| {
            self.domains[..i]
                .iter()
                .any(|earlier| earlier.name == d.name)
                .then_some(&d.name)
        })
    }

    /// Splits domain names into `(enabled, disabled)`, preserving order.
    #[must_use]
    pub fn partition_names(domains: &[Domain]) -> (Vec<&str>, Vec<&str>) {
        let (enabled, disabled): (Vec<&Domain>, Vec<&Domain>) =
            domains.iter().partition(|d| d.enabled);

        (
            enabled.into_iter().map(|d| d.name.as_str()).collect(),
            disabled.into_iter().map(|d| d.name.as_str()).collect(),
        )
    }
}
