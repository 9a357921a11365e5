//! Display hook for the domain list.

use std::fmt::Write;

use crate::model::Domain;

/// Host suffix appended to names when displaying them.
pub const PROVIDER_SUFFIX: &str = ".duckdns.org";

/// Receives the full domain list after every successful change.
///
/// Implementations redraw whatever shows the list to the user. They get
/// the list itself and never need to read anything back from what they drew.
pub trait DomainView: Send + Sync {
    /// Redraws the domain list.
    fn render(&self, domains: &[Domain]);
}

/// A view that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopView;

impl DomainView for NoopView {
    fn render(&self, _domains: &[Domain]) {}
}

/// Formats the domain list as a plain-text table.
///
/// # Example
///
/// ```
/// use ducky::model::{Domain, DomainName};
/// use ducky::registry::format_table;
///
/// let table = format_table(&[Domain::new(DomainName::new("home").unwrap())]);
/// assert!(table.contains("home.duckdns.org"));
/// ```
#[must_use]
pub fn format_table(domains: &[Domain]) -> String {
    if domains.is_empty() {
        return "(no domains)\n".to_string();
    }

    let width = domains
        .iter()
        .map(|d| d.name.as_str().len() + PROVIDER_SUFFIX.len())
        .max()
        .unwrap_or(0)
        .max("name".len());

    let mut table = format!("{:<width$}  enabled\n", "name");
    for domain in domains {
        let host = format!("{}{PROVIDER_SUFFIX}", domain.name);
        let mark = if domain.enabled { "[x]" } else { "[ ]" };
        // Writing into a String cannot fail.
        let _ = writeln!(table, "{host:<width$}  {mark}");
    }
    table
}
