//! JSON file implementation of the document store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::Config;

use super::{DocumentStore, LoadResult, StoreError};

/// File-based implementation of [`DocumentStore`].
///
/// Stores the configuration as pretty-printed JSON in exactly the document
/// shape users may also edit by hand:
///
/// ```json
/// { "token": "...", "interval": 5, "domains": [{ "name": "home", "enabled": true }] }
/// ```
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename so a crash never leaves a torn document:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    /// Creates a store for the document at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses and checks document contents.
    fn parse(content: &str) -> LoadResult {
        let config = match serde_json::from_str::<Config>(content) {
            Ok(config) => config,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Invalid JSON: {e}"),
                };
            }
        };

        if let Some(name) = config.first_duplicate() {
            return LoadResult::Corrupted {
                reason: format!("Duplicate domain name '{name}'"),
            };
        }

        LoadResult::Loaded(config)
    }

    /// Performs the blocking save operation.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn save_blocking(path: &Path, content: &str) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StoreError::Write)?;
            }
        }

        // config.json -> config.json.tmp, never config.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

        std::fs::write(&temp_path, content).map_err(StoreError::Write)?;
        std::fs::rename(&temp_path, path).map_err(StoreError::Write)?;

        Ok(())
    }
}

impl DocumentStore for FileDocumentStore {
    fn load(&self) -> LoadResult {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => LoadResult::NotFound,
            Err(e) => LoadResult::Corrupted {
                reason: format!("Failed to read file: {e}"),
            },
        }
    }

    async fn save(&self, config: &Config) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(config).map_err(StoreError::Serialize)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || Self::save_blocking(&path, &content))
            .await
            .map_err(|e| StoreError::Write(std::io::Error::other(e)))?
    }
}
