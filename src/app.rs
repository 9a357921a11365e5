//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use std::path::Path;

use ducky::config::ConfigError;
use ducky::store::StoreError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, unreadable settings file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - corrupt document, rejected command, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            eprintln!("\nRun 'ducky init' to generate a settings template.");
        }
        ConfigError::AlreadyExists { .. } => {
            eprintln!("\nUse 'ducky init -o <file>' to write the template elsewhere.");
        }
        _ => {}
    }
}

/// Prints helpful hints for fatal runtime errors.
pub fn print_run_hint(error: &RunError, document: &Path) {
    if let RunError::Load(StoreError::Corrupted { .. }) = error {
        eprintln!(
            "\nFix or remove '{}' (a new empty document is created when it is missing).",
            document.display()
        );
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
