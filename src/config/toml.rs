//! TOML settings file parsing.
//!
//! Defines the structure of the settings file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root structure of the settings file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Provider endpoint configuration
    #[serde(default)]
    pub provider: ProviderSection,

    /// Domain document location
    #[serde(default)]
    pub store: StoreSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Status line configuration
    #[serde(default)]
    pub display: DisplaySection,
}

/// Provider section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    /// Update endpoint URL
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Store section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Path to the JSON domain document (`~` is expanded)
    pub path: Option<String>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of attempts per request
    pub max_attempts: Option<u32>,

    /// Initial retry delay in seconds
    pub initial_delay: Option<u64>,

    /// Maximum retry delay in seconds
    pub max_delay: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,
}

/// Display section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplaySection {
    /// Handlebars template for the status line
    pub status_template: Option<String>,
}

impl TomlConfig {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default settings file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ducky settings file
#
# Token, interval and domains are not set here; they live in the domain
# document and are changed with `ducky token`, `ducky interval`, `ducky add`,
# or from the interactive console.

[provider]
# Update endpoint (default: https://www.duckdns.org/update)
# endpoint = "https://www.duckdns.org/update"

# Request timeout in seconds (default: 10)
timeout = 10

[store]
# Domain document path, `~` is expanded (default: config.json)
# path = "~/.config/ducky/config.json"

[retry]
# Maximum number of attempts per update request (default: 1, no retry)
# max_attempts = 1

# Initial retry delay in seconds (default: 5)
# initial_delay = 5

# Maximum retry delay in seconds (default: 60)
# max_delay = 60

# Backoff multiplier (default: 2.0)
# multiplier = 2.0

[display]
# Handlebars status line template
# Available variables: {{last}}, {{next}}, {{interval}}
# status_template = "last update: {{last}}, next update: {{next}}"
"#
    .to_string()
}
