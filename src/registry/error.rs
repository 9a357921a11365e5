//! Error types for registry operations.

use thiserror::Error;

use crate::model::ValidationError;
use crate::store::StoreError;

/// Error type for domain registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The input was rejected; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No domain with this name is registered.
    ///
    /// Usually means the caller's view of the list is stale.
    #[error("Domain '{name}' not found")]
    NotFound {
        /// The name that was looked up
        name: String,
    },

    /// The change could not be persisted (or the config is not loaded).
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistryError {
    /// Returns true if the error is caused by user input and should be shown
    /// to the user rather than logged as a failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}
