//! Console command parsing.

use std::fmt;

use super::ControlError;

/// Help text for the interactive console.
pub const HELP: &str = "\
Commands:
  token <value>       set the provider token
  interval <minutes>  set the update interval (1-60) and reschedule
  add <name>          add a domain (enabled)
  remove <name>       remove a domain
  enable <name>       enable a domain
  disable <name>      disable a domain (its address is set to 0.0.0.0)
  list                show all domains
  update              update now and restart the timer
  help                show this help
  quit                exit";

/// A user command, from the console or a CLI subcommand.
#[derive(Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the provider token.
    SetToken(String),
    /// Change the interval; the raw value is range-checked on execution.
    SetInterval(i64),
    /// Add a domain.
    Add(String),
    /// Remove a domain.
    Remove(String),
    /// Enable a domain.
    Enable(String),
    /// Disable a domain.
    Disable(String),
    /// Show the domain list.
    List,
    /// Run an update cycle now and re-arm the timer.
    Update,
    /// Show the help text.
    Help,
    /// Exit the console.
    Quit,
}

impl Action {
    /// Parses one console line.
    ///
    /// The first word selects the command; the rest of the line, trimmed, is
    /// its argument. Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError`] for unknown commands, missing or unexpected
    /// arguments, and non-numeric intervals.
    pub fn parse(line: &str) -> Result<Option<Self>, ControlError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));

        let action = match command.to_ascii_lowercase().as_str() {
            "token" => Self::SetToken(required(rest, "token", "value")?.to_string()),
            "interval" => {
                let raw = required(rest, "interval", "minutes")?;
                let minutes = raw.parse::<i64>().map_err(|_| ControlError::InvalidNumber {
                    value: raw.to_string(),
                })?;
                Self::SetInterval(minutes)
            }
            "add" => Self::Add(required(rest, "add", "name")?.to_string()),
            "remove" | "rm" => Self::Remove(required(rest, "remove", "name")?.to_string()),
            "enable" => Self::Enable(required(rest, "enable", "name")?.to_string()),
            "disable" => Self::Disable(required(rest, "disable", "name")?.to_string()),
            "list" | "ls" => none(rest, "list", Self::List)?,
            "update" => none(rest, "update", Self::Update)?,
            "help" | "?" => Self::Help,
            "quit" | "exit" => none(rest, "quit", Self::Quit)?,
            _ => return Err(ControlError::UnknownCommand(command.to_string())),
        };

        Ok(Some(action))
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, ControlError> {
    if rest.is_empty() {
        Err(ControlError::MissingArgument { command, argument })
    } else {
        Ok(rest)
    }
}

fn none(rest: &str, command: &'static str, action: Action) -> Result<Action, ControlError> {
    if rest.is_empty() {
        Ok(action)
    } else {
        Err(ControlError::UnexpectedArgument { command })
    }
}

// Keeps the token out of debug logs.
impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetToken(_) => f.debug_tuple("SetToken").field(&"<redacted>").finish(),
            Self::SetInterval(m) => f.debug_tuple("SetInterval").field(m).finish(),
            Self::Add(n) => f.debug_tuple("Add").field(n).finish(),
            Self::Remove(n) => f.debug_tuple("Remove").field(n).finish(),
            Self::Enable(n) => f.debug_tuple("Enable").field(n).finish(),
            Self::Disable(n) => f.debug_tuple("Disable").field(n).finish(),
            Self::List => f.write_str("List"),
            Self::Update => f.write_str("Update"),
            Self::Help => f.write_str("Help"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}
