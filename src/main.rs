//! ducky: a small DuckDNS updater.
//!
//! Entry point for the ducky application.

use ducky::config::{Cli, Command, Settings, write_default_config};
use ducky::control::Action;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, print_run_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    // Load and validate settings
    let settings = match Settings::load(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(settings.verbose);
    let action = cli.command.as_ref().and_then(Command::action);
    if action.is_some() {
        tracing::debug!("{settings}");
    } else {
        tracing::info!("{settings}");
    }

    run_application(settings, action)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Settings template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            print_config_hint(&e);
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs the timer and console, or a single command, with the given settings.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(settings: Settings, action: Option<Action>) -> ExitCode {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
    let document = settings.document_path.clone();

    match runtime.block_on(run::execute(settings, action)) {
        Ok(()) => exit_code::SUCCESS,
        Err(run::RunError::Command(e)) if e.is_user_facing() => {
            eprintln!("Error: {e}");
            exit_code::runtime_error()
        }
        Err(e) => {
            tracing::error!("Application error: {e}");
            print_run_hint(&e, &document);
            exit_code::runtime_error()
        }
    }
}
