//! User commands: parsing and execution.
//!
//! Every mutation goes through the same path: validate, persist, then (for
//! interval changes and forced updates) restart the scheduler. A rejected
//! command changes nothing.

mod action;
mod error;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;


pub use action::{Action, HELP};
pub use error::ControlError;

use std::sync::Arc;

use crate::model::{Domain, Interval};
use crate::registry::{DomainRegistry, DomainView};
use crate::scheduler::{Scheduler, Tick};
use crate::store::{ConfigStore, DocumentStore};

/// Outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A confirmation to show the user.
    Message(String),
    /// The current domain list.
    Domains(Vec<Domain>),
    /// The help text was requested.
    Help,
    /// The user asked to exit.
    Quit,
}

/// Applies [`Action`]s to the configuration and the scheduler.
#[derive(Debug)]
pub struct Controller<B, V, T> {
    store: Arc<ConfigStore<B>>,
    registry: DomainRegistry<B, V>,
    scheduler: Arc<Scheduler<T>>,
}

impl<B, V, T> Controller<B, V, T>
where
    B: DocumentStore,
    V: DomainView,
    T: Tick,
{
    /// Creates a controller over a loaded store.
    #[must_use]
    pub fn new(store: Arc<ConfigStore<B>>, view: V, scheduler: Arc<Scheduler<T>>) -> Self {
        Self {
            registry: DomainRegistry::new(Arc::clone(&store), view),
            store,
            scheduler,
        }
    }

    /// Returns the scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &Arc<Scheduler<T>> {
        &self.scheduler
    }

    /// Executes one action.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError`] if validation or persistence fails. Nothing is
    /// changed and the timer is left alone in that case.
    pub async fn execute(&self, action: Action) -> Result<Reply, ControlError> {
        tracing::debug!("Executing {action:?}");

        match action {
            Action::SetToken(token) => {
                self.store.set_token(token).await?;
                Ok(Reply::Message("Token saved".to_string()))
            }
            Action::SetInterval(minutes) => self.set_interval(minutes).await,
            Action::Add(name) => {
                let domain = self.registry.add(&name).await?;
                Ok(Reply::Message(format!("Added '{}'", domain.name)))
            }
            Action::Remove(name) => {
                let domain = self.registry.remove(&name).await?;
                Ok(Reply::Message(format!("Removed '{}'", domain.name)))
            }
            Action::Enable(name) => {
                let domain = self.registry.toggle(&name, true).await?;
                Ok(Reply::Message(format!("Enabled '{}'", domain.name)))
            }
            Action::Disable(name) => {
                let domain = self.registry.toggle(&name, false).await?;
                Ok(Reply::Message(format!("Disabled '{}'", domain.name)))
            }
            Action::List => Ok(Reply::Domains(self.registry.list().await?)),
            Action::Update => self.force_update().await,
            Action::Help => Ok(Reply::Help),
            Action::Quit => Ok(Reply::Quit),
        }
    }

    /// Validates, persists, then reschedules with the new interval.
    ///
    /// The timer restarts even when the value is unchanged.
    async fn set_interval(&self, minutes: i64) -> Result<Reply, ControlError> {
        let interval = Interval::new(minutes)?;
        self.store.set_interval(interval).await?;

        self.scheduler.start(interval).await;
        Ok(Reply::Message(format!("Interval set to {interval}")))
    }

    /// Runs an update cycle now and re-arms the timer with the stored interval.
    async fn force_update(&self) -> Result<Reply, ControlError> {
        let interval = self.store.get().await?.interval;
        self.scheduler.start(interval).await;
        Ok(Reply::Message("Update sent".to_string()))
    }
}
