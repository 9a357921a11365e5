//! Persistence of the configuration document.
//!
//! This module provides:
//! - The persistence seam ([`DocumentStore`], [`LoadResult`])
//! - The JSON file implementation ([`FileDocumentStore`])
//! - The owner of the live configuration ([`ConfigStore`])
//!
//! [`ConfigStore`] holds the only in-memory [`Config`] of the process behind an
//! async mutex. Every change goes through [`ConfigStore::modify`], which keeps
//! the lock for the whole validate, persist, commit sequence. Readers therefore
//! never observe a change that has not reached the document yet.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileDocumentStore;

use std::io;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::model::{Config, Interval};

/// Result of reading the persisted document.
///
/// Explicitly models all valid states:
/// - The document was read and parsed
/// - No document exists yet (first run)
/// - A document exists but cannot be used
#[derive(Debug, Clone)]
pub enum LoadResult {
    /// Successfully loaded the saved configuration.
    Loaded(Config),

    /// No document exists (first run or explicitly deleted).
    NotFound,

    /// A document exists but could not be read or parsed.
    Corrupted {
        /// Reason for corruption (for logging/debugging).
        reason: String,
    },
}

/// Errors from the configuration store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The configuration was accessed before [`ConfigStore::load`] completed.
    #[error("Config has not been loaded yet")]
    NotLoaded,

    /// [`ConfigStore::load`] was called twice.
    #[error("Config already loaded")]
    AlreadyLoaded,

    /// The persisted document exists but is unusable.
    ///
    /// Fatal at startup: silently replacing it would discard the user's
    /// token and domains.
    #[error("Config document is corrupted: {reason}")]
    Corrupted {
        /// Why the document was rejected.
        reason: String,
    },

    /// Failed to write the document.
    #[error("Failed to write config document: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize the document to JSON.
    #[error("Failed to serialize config document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Abstraction over where the configuration document lives.
///
/// Implementations should:
/// - Return `LoadResult::NotFound` only when the document is genuinely absent
/// - Use atomic writes so a crash never leaves a half-written document
///
/// # Testing
///
/// Use [`mock::MockDocumentStore`] in tests to avoid filesystem dependencies.
pub trait DocumentStore: Send + Sync {
    /// Reads the persisted document.
    fn load(&self) -> LoadResult;

    /// Overwrites the persisted document with `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or written.
    fn save(
        &self,
        config: &Config,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// Owner of the live configuration.
///
/// Created empty, filled once by [`load`](Self::load), then mutated only
/// through [`modify`](Self::modify) and the helpers built on it.
#[derive(Debug)]
pub struct ConfigStore<B> {
    backend: B,
    config: Mutex<Option<Config>>,
}

impl<B: DocumentStore> ConfigStore<B> {
    /// Creates a store that has not loaded anything yet.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            config: Mutex::const_new(None),
        }
    }

    /// Returns the persistence backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the persisted document, creating it on first run.
    ///
    /// A missing document is replaced by [`Config::default`], which is
    /// persisted immediately.
    ///
    /// # Errors
    ///
    /// - [`StoreError::AlreadyLoaded`] if called more than once
    /// - [`StoreError::Corrupted`] if the document exists but is unusable
    /// - Write errors while persisting the first-run document
    pub async fn load(&self) -> Result<Config, StoreError> {
        let mut slot = self.config.lock().await;
        if slot.is_some() {
            return Err(StoreError::AlreadyLoaded);
        }

        let config = match self.backend.load() {
            LoadResult::Loaded(config) => {
                tracing::debug!(
                    "Loaded config with {} domain(s), interval {}",
                    config.domains.len(),
                    config.interval
                );
                config
            }
            LoadResult::NotFound => {
                tracing::info!("No config document found, creating default");
                let config = Config::default();
                self.backend.save(&config).await?;
                config
            }
            LoadResult::Corrupted { reason } => {
                return Err(StoreError::Corrupted { reason });
            }
        };

        *slot = Some(config.clone());
        Ok(config)
    }

    /// Returns a snapshot of the live configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotLoaded`] before [`load`](Self::load) completed.
    pub async fn get(&self) -> Result<Config, StoreError> {
        self.config.lock().await.clone().ok_or(StoreError::NotLoaded)
    }

    /// Persists the live configuration as it is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotLoaded`] before load, or the backend's write error.
    pub async fn save(&self) -> Result<(), StoreError> {
        let slot = self.config.lock().await;
        let config = slot.as_ref().ok_or(StoreError::NotLoaded)?;
        self.backend.save(config).await
    }

    /// Applies a change and persists it before anyone else can read it.
    ///
    /// `change` runs on a copy of the configuration while the lock is held.
    /// If it returns an error nothing is changed or written. Otherwise the copy
    /// is persisted and only then becomes the live configuration, so a failed
    /// write also leaves memory untouched.
    ///
    /// # Errors
    ///
    /// Returns the error from `change`, [`StoreError::NotLoaded`], or the
    /// backend's write error (converted into `E`).
    pub async fn modify<T, E, F>(&self, change: F) -> Result<(T, Config), E>
    where
        F: FnOnce(&mut Config) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.modify_observed(change, |_| {}).await
    }

    /// [`modify`](Self::modify), then hands the committed configuration to
    /// `committed` before the lock is released.
    ///
    /// Observers therefore see commits in the order they happened.
    ///
    /// # Errors
    ///
    /// Same as [`modify`](Self::modify); `committed` is not called on error.
    pub async fn modify_observed<T, E, F, C>(
        &self,
        change: F,
        committed: C,
    ) -> Result<(T, Config), E>
    where
        F: FnOnce(&mut Config) -> Result<T, E>,
        C: FnOnce(&Config),
        E: From<StoreError>,
    {
        let mut slot = self.config.lock().await;
        let current = slot.as_ref().ok_or(StoreError::NotLoaded)?;

        let mut next = current.clone();
        let output = change(&mut next)?;

        self.backend.save(&next).await?;
        *slot = Some(next.clone());
        committed(&next);

        Ok((output, next))
    }

    /// Replaces the provider token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotLoaded`] before load, or the backend's write error.
    pub async fn set_token(&self, token: impl Into<String>) -> Result<(), StoreError> {
        let token = token.into();
        self.modify(|config| {
            config.token = token;
            Ok::<_, StoreError>(())
        })
        .await?;

        tracing::info!("Token updated");
        Ok(())
    }

    /// Replaces the update interval.
    ///
    /// Returns the previous interval. Rescheduling is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotLoaded`] before load, or the backend's write error.
    pub async fn set_interval(&self, interval: Interval) -> Result<Interval, StoreError> {
        let (previous, _) = self
            .modify(|config| {
                Ok::<_, StoreError>(std::mem::replace(&mut config.interval, interval))
            })
            .await?;

        tracing::info!("Interval changed from {previous} to {interval}");
        Ok(previous)
    }
}

/// Mock document store for testing.
///
/// Allows tests to inject specific load results and capture saved documents.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// A mock implementation of [`DocumentStore`] for testing.
    #[derive(Debug)]
    pub struct MockDocumentStore {
        load_result: LoadResult,
        saved: RwLock<Vec<Config>>,
        save_count: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl MockDocumentStore {
        fn with_result(load_result: LoadResult) -> Self {
            Self {
                load_result,
                saved: RwLock::new(Vec::new()),
                save_count: AtomicUsize::new(0),
                fail_writes: AtomicBool::new(false),
            }
        }

        /// Creates a mock that returns `LoadResult::Loaded` with the given config.
        #[must_use]
        pub fn with_loaded(config: Config) -> Self {
            Self::with_result(LoadResult::Loaded(config))
        }

        /// Creates a mock that returns `LoadResult::NotFound`.
        #[must_use]
        pub fn not_found() -> Self {
            Self::with_result(LoadResult::NotFound)
        }

        /// Creates a mock that returns `LoadResult::Corrupted`.
        #[must_use]
        pub fn corrupted(reason: impl Into<String>) -> Self {
            Self::with_result(LoadResult::Corrupted {
                reason: reason.into(),
            })
        }

        /// Makes every following save fail with a write error.
        pub fn fail_writes(&self) {
            self.fail_writes.store(true, Ordering::SeqCst);
        }

        /// Returns the number of save attempts.
        #[must_use]
        pub fn save_count(&self) -> usize {
            self.save_count.load(Ordering::SeqCst)
        }

        /// Returns the last successfully saved document, if any.
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned (only in test code).
        #[must_use]
        pub fn last_saved(&self) -> Option<Config> {
            self.saved.read().unwrap().last().cloned()
        }
    }

    impl DocumentStore for MockDocumentStore {
        fn load(&self) -> LoadResult {
            self.load_result.clone()
        }

        async fn save(&self, config: &Config) -> Result<(), StoreError> {
            self.save_count.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Write(io::Error::other("disk full")));
            }
            self.saved.write().unwrap().push(config.clone());
            Ok(())
        }
    }
}
