//! Validated settings after merging CLI and TOML sources.
//!
//! This module contains the final, validated settings used by the
//! application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::scheduler::StatusFormatter;
use crate::update::RetryPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated runtime settings.
///
/// # Construction
///
/// Use [`Settings::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid settings.
#[derive(Debug)]
pub struct Settings {
    /// Path to the JSON domain document
    pub document_path: PathBuf,

    /// Provider update endpoint
    pub endpoint: Url,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Retry policy for failed update requests
    pub retry_policy: RetryPolicy,

    /// Status line renderer
    pub status: StatusFormatter,

    /// Dry-run mode (log updates without sending them)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings {{ document: {}, endpoint: {}, timeout: {}s, retry: {}x/{}s, dry_run: {} }}",
            self.document_path.display(),
            self.endpoint,
            self.request_timeout.as_secs(),
            self.retry_policy.max_attempts,
            self.retry_policy.initial_delay.as_secs(),
            self.dry_run,
        )
    }
}

impl Settings {
    /// Creates validated settings from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values, which take
    /// precedence over [`defaults`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint is not an absolute http(s) URL
    /// - The request timeout is zero
    /// - Retry values are out of range
    /// - The status template does not compile
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        Ok(Self {
            document_path: Self::resolve_document_path(cli, toml),
            endpoint: Self::resolve_endpoint(cli, toml)?,
            request_timeout: Self::resolve_timeout(cli, toml)?,
            retry_policy: Self::build_retry_policy(cli, toml)?,
            status: Self::resolve_status_template(cli, toml)?,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges settings from CLI and optional settings file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The settings file cannot be read or parsed
    /// - The merged settings are invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_home(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_document_path(cli: &Cli, toml: Option<&TomlConfig>) -> PathBuf {
        let path = cli
            .document
            .clone()
            .or_else(|| toml.and_then(|t| t.store.path.as_ref().map(PathBuf::from)))
            .unwrap_or_else(|| PathBuf::from(defaults::DOCUMENT_PATH));

        expand_home(&path)
    }

    fn resolve_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let raw = cli
            .endpoint
            .as_deref()
            .or_else(|| toml.and_then(|t| t.provider.endpoint.as_deref()))
            .unwrap_or(defaults::ENDPOINT);

        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: raw.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.provider.timeout))
            .unwrap_or(defaults::REQUEST_TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_secs = cli
            .retry_delay
            .or_else(|| retry.and_then(|r| r.initial_delay))
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_SECS);

        let max_delay_secs = retry
            .and_then(|r| r.max_delay)
            .unwrap_or(defaults::RETRY_MAX_DELAY_SECS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if initial_delay_secs == 0 {
            return Err(ConfigError::InvalidRetry(
                "initial_delay must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay_secs < initial_delay_secs {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay ({max_delay_secs}s) must be >= initial_delay ({initial_delay_secs}s)"
            )));
        }

        Ok(RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_secs(initial_delay_secs))
            .with_max_delay(Duration::from_secs(max_delay_secs))
            .with_multiplier(multiplier))
    }

    fn resolve_status_template(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<StatusFormatter, ConfigError> {
        let template = cli
            .status_template
            .as_deref()
            .or_else(|| toml.and_then(|t| t.display.status_template.as_deref()))
            .unwrap_or(defaults::STATUS_TEMPLATE);

        StatusFormatter::new(template).map_err(|e| ConfigError::InvalidTemplate {
            reason: e.to_string(),
        })
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Writes the default settings template to a file.
///
/// Refuses to overwrite an existing file.
///
/// # Errors
///
/// Returns an error if the file exists or cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
