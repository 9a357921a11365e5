//! Domain registry: CRUD over the configured domains.
//!
//! Every operation validates its input and applies the change through
//! [`ConfigStore::modify_observed`], so it is persisted before returning and
//! the [`DomainView`] is redrawn while the store is still locked.

mod error;
mod view;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::RegistryError;
pub use view::{DomainView, NoopView, PROVIDER_SUFFIX, format_table};

use std::sync::Arc;

use crate::model::{Config, Domain, DomainName, ValidationError};
use crate::store::{ConfigStore, DocumentStore};

/// Add, remove and toggle domains by name.
///
/// Domains are identified purely by their name, which the caller passes
/// explicitly.
#[derive(Debug)]
pub struct DomainRegistry<B, V> {
    store: Arc<ConfigStore<B>>,
    view: V,
}

impl<B, V> DomainRegistry<B, V>
where
    B: DocumentStore,
    V: DomainView,
{
    /// Creates a registry over the shared configuration store.
    #[must_use]
    pub const fn new(store: Arc<ConfigStore<B>>, view: V) -> Self {
        Self { store, view }
    }

    /// Returns the view refreshed after each change.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Registers a new, enabled domain at the end of the list.
    ///
    /// Whitespace around `name` is ignored here and by every lookup.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyName`] if nothing is left after trimming
    /// - [`ValidationError::DuplicateName`] if the name is already registered
    /// - [`ValidationError::InvalidCharacters`] for anything outside `[A-Za-z0-9-]`
    /// - [`RegistryError::Store`] if the change cannot be persisted
    pub async fn add(&self, name: &str) -> Result<Domain, RegistryError> {
        let trimmed = name.trim();

        let (domain, _) = self
            .store
            .modify_observed(
                |config: &mut Config| -> Result<Domain, RegistryError> {
                    if trimmed.is_empty() {
                        return Err(ValidationError::EmptyName.into());
                    }
                    if config.contains(trimmed) {
                        return Err(ValidationError::DuplicateName(trimmed.to_string()).into());
                    }

                    let domain = Domain::new(DomainName::new(trimmed)?);
                    config.domains.push(domain.clone());
                    Ok(domain)
                },
                |config| self.refresh(config),
            )
            .await?;

        tracing::info!("Added domain {}", domain.name);
        Ok(domain)
    }

    /// Removes a domain, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if no domain has this name
    /// - [`RegistryError::Store`] if the change cannot be persisted
    pub async fn remove(&self, name: &str) -> Result<Domain, RegistryError> {
        let (removed, _) = self
            .store
            .modify_observed(
                |config: &mut Config| -> Result<Domain, RegistryError> {
                    let index = position(config, name)?;
                    Ok(config.domains.remove(index))
                },
                |config| self.refresh(config),
            )
            .await?;

        tracing::info!("Removed domain {}", removed.name);
        Ok(removed)
    }

    /// Enables or disables a domain.
    ///
    /// Setting the current value again is allowed and still persists.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if no domain has this name
    /// - [`RegistryError::Store`] if the change cannot be persisted
    pub async fn toggle(&self, name: &str, enabled: bool) -> Result<Domain, RegistryError> {
        let (domain, _) = self
            .store
            .modify_observed(
                |config: &mut Config| -> Result<Domain, RegistryError> {
                    let index = position(config, name)?;
                    let domain = &mut config.domains[index];
                    domain.enabled = enabled;
                    Ok(domain.clone())
                },
                |config| self.refresh(config),
            )
            .await?;

        let state = if enabled { "enabled" } else { "disabled" };
        tracing::info!("Domain {} {state}", domain.name);
        Ok(domain)
    }

    /// Returns the domains in display order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] if the configuration is not loaded.
    pub async fn list(&self) -> Result<Vec<Domain>, RegistryError> {
        Ok(self.store.get().await?.domains)
    }

    fn refresh(&self, config: &Config) {
        self.view.render(&config.domains);
    }
}

/// Index of the domain called `name`, ignoring surrounding whitespace.
fn position(config: &Config, name: &str) -> Result<usize, RegistryError> {
    let name = name.trim();
    config
        .domains
        .iter()
        .position(|d| d.name == *name)
        .ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
        })
}
