//! ducky: a small DuckDNS updater.
//!
//! Keeps a token, an update interval and an ordered list of domains in a JSON
//! document, and on a fixed timer pushes current-IP updates for enabled
//! domains and null-IP updates for disabled ones.
//!
//! The pieces, leaf first:
//! - [`model`]: the validated data types
//! - [`store`]: the single in-memory config and its persistence
//! - [`registry`]: domain list operations
//! - [`update`]: the provider requests
//! - [`scheduler`]: the single recurring timer and the update cycle
//! - [`control`]: user commands wired to all of the above
//! - [`config`]: process settings (CLI, TOML, defaults)

pub mod config;
pub mod control;
pub mod model;
pub mod registry;
pub mod scheduler;
pub mod store;
pub mod time;
pub mod update;
