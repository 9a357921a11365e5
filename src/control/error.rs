//! Error types for console and subcommand actions.

use thiserror::Error;

use crate::model::ValidationError;
use crate::registry::RegistryError;
use crate::store::StoreError;

/// Errors from parsing or executing a user command.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The command word is not recognized.
    #[error("Unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    /// A required argument was not given.
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        /// The command word
        command: &'static str,
        /// Name of the missing argument
        argument: &'static str,
    },

    /// The command takes no arguments.
    #[error("'{command}' takes no arguments")]
    UnexpectedArgument {
        /// The command word
        command: &'static str,
    },

    /// A numeric argument did not parse.
    #[error("'{value}' is not a whole number")]
    InvalidNumber {
        /// The raw argument
        value: String,
    },

    /// Input rejected by validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Domain list operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration could not be read or persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ControlError {
    /// Returns true for errors caused by user input, shown as a message
    /// rather than logged as a failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        match self {
            Self::Registry(e) => e.is_user_facing(),
            Self::Store(_) => false,
            _ => true,
        }
    }
}
