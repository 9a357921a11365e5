//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::control::Action;

/// ducky: keeps DuckDNS domains pointed at this machine.
///
/// Without a subcommand, runs the update timer and an interactive console.
#[derive(Debug, Parser)]
#[command(name = "ducky")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to settings file (TOML)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the domain document (JSON)
    #[arg(long, global = true)]
    pub document: Option<PathBuf>,

    /// Provider update endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum number of attempts per update request
    #[arg(long = "retry-max", global = true)]
    pub retry_max: Option<u32>,

    /// Initial retry delay in seconds
    #[arg(long = "retry-delay", global = true)]
    pub retry_delay: Option<u64>,

    /// Handlebars template for the status line
    #[arg(long = "status-template", global = true)]
    pub status_template: Option<String>,

    /// Test mode - log updates without sending them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for ducky
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the update timer and the interactive console (default)
    Run,

    /// Generate a default settings file
    Init {
        /// Output path for the settings file
        #[arg(long, short, default_value = super::defaults::SETTINGS_FILE)]
        output: PathBuf,
    },

    /// Set the provider token
    Token {
        /// The token value
        value: String,
    },

    /// Set the update interval in minutes (1-60)
    Interval {
        /// Minutes between updates
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },

    /// Add a domain (enabled)
    Add {
        /// Subdomain name, without the provider suffix
        name: String,
    },

    /// Remove a domain
    Remove {
        /// Subdomain name
        name: String,
    },

    /// Enable a domain
    Enable {
        /// Subdomain name
        name: String,
    },

    /// Disable a domain (its address is set to 0.0.0.0)
    Disable {
        /// Subdomain name
        name: String,
    },

    /// Show all domains
    List,

    /// Run one update cycle now
    Update,
}

impl Command {
    /// Returns the one-shot action for this subcommand.
    ///
    /// `None` for `run` and `init`, which are handled by the binary itself.
    #[must_use]
    pub fn action(&self) -> Option<Action> {
        let action = match self {
            Self::Run | Self::Init { .. } => return None,
            Self::Token { value } => Action::SetToken(value.clone()),
            Self::Interval { minutes } => Action::SetInterval(*minutes),
            Self::Add { name } => Action::Add(name.clone()),
            Self::Remove { name } => Action::Remove(name.clone()),
            Self::Enable { name } => Action::Enable(name.clone()),
            Self::Disable { name } => Action::Disable(name.clone()),
            Self::List => Action::List,
            Self::Update => Action::Update,
        };
        Some(action)
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
