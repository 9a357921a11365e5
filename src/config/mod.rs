//! Runtime settings for ducky.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML settings file parsing ([`TomlConfig`])
//! - Validated settings ([`Settings`])
//! - Settings file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! These are process settings (where the document lives, which endpoint to
//! call, how to retry). The user's token, interval and domains are not here;
//! they live in the persisted document managed by [`crate::store`].
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML settings file** - Values from the file given with `--config`
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! # TOML-Only Options
//!
//! Some retry policy options are TOML-only (not available via CLI):
//! - `retry.max_delay` (default: 60s) - Maximum retry delay
//! - `retry.multiplier` (default: 2.0) - Exponential backoff multiplier

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{Settings, expand_home, write_default_config};
