//! Application execution logic.
//!
//! This module wires the store, dispatcher, scheduler and controller
//! together, then either runs one command or runs the update timer with an
//! interactive console until shutdown.

use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;

use ducky::config::Settings;
use ducky::control::{Action, ControlError, Controller, HELP, Reply};
use ducky::model::Domain;
use ducky::registry::{DomainView, format_table};
use ducky::scheduler::{LogStatusSink, Scheduler, Tick, UpdateCycle};
use ducky::store::{ConfigStore, DocumentStore, FileDocumentStore, StoreError};
use ducky::update::{DuckDnsDispatcher, HttpError, ReqwestClient};

/// Type alias for the application's update cycle.
type AppCycle = UpdateCycle<FileDocumentStore, DuckDnsDispatcher<ReqwestClient>, LogStatusSink>;

/// Type alias for the application's controller.
type AppController = Controller<FileDocumentStore, ConsoleView, AppCycle>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The domain document could not be loaded.
    #[error("Failed to load domain document: {0}")]
    Load(#[source] StoreError),

    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// Reading the console failed.
    #[error("Failed to read console input: {0}")]
    Console(#[source] std::io::Error),

    /// A one-shot command failed.
    #[error("{0}")]
    Command(#[source] ControlError),
}

/// Prints the domain table whenever the list changes.
#[derive(Debug, Clone, Copy, Default)]
struct ConsoleView;

impl DomainView for ConsoleView {
    fn render(&self, domains: &[Domain]) {
        print!("{}", format_table(domains));
    }
}

/// Executes the application.
///
/// This function:
/// 1. Loads the domain document (creating a default one on first run)
/// 2. Creates the dispatcher, update cycle, scheduler and controller
/// 3. With an action: executes it once and returns
/// 4. Without: starts the timer with the stored interval and reads console
///    commands until `quit` or a shutdown signal (Ctrl+C)
///
/// # Errors
///
/// Returns an error if:
/// - The document is corrupt or cannot be written
/// - The HTTP client cannot be created
/// - The one-shot command fails
/// - Reading the console fails
///
/// # Coverage Note
///
/// The console path is excluded from coverage because it requires real stdin
/// and signal handling.
pub async fn execute(settings: Settings, action: Option<Action>) -> Result<(), RunError> {
    let store = Arc::new(ConfigStore::new(FileDocumentStore::new(
        &settings.document_path,
    )));
    let config = store.load().await.map_err(RunError::Load)?;
    tracing::debug!(
        "Loaded {} domain(s) from {}",
        config.domains.len(),
        store.backend().path().display()
    );

    if settings.dry_run {
        tracing::info!("Dry-run mode enabled - updates will be logged but not sent");
    }

    let controller = create_controller(&settings, store)?;

    let result = match action {
        Some(action) => run_once(&controller, action).await,
        None => {
            controller.scheduler().start(config.interval).await;
            run_console(&controller).await
        }
    };

    controller.scheduler().shutdown().await;
    result
}

/// Creates the controller and its scheduler from settings.
fn create_controller(
    settings: &Settings,
    store: Arc<ConfigStore<FileDocumentStore>>,
) -> Result<AppController, RunError> {
    let client =
        ReqwestClient::with_timeout(settings.request_timeout).map_err(RunError::HttpClient)?;
    let dispatcher = DuckDnsDispatcher::new(client, settings.endpoint.clone())
        .with_retry_policy(settings.retry_policy.clone());

    let cycle = UpdateCycle::new(
        Arc::clone(&store),
        dispatcher,
        LogStatusSink::new(settings.status.clone()),
    )
    .with_dry_run(settings.dry_run);

    let scheduler = Arc::new(Scheduler::new(cycle));
    Ok(Controller::new(store, ConsoleView, scheduler))
}

/// Executes a single command from the CLI.
async fn run_once<B, V, T>(controller: &Controller<B, V, T>, action: Action) -> Result<(), RunError>
where
    B: DocumentStore,
    V: DomainView,
    T: Tick,
{
    let reply = controller
        .execute(action)
        .await
        .map_err(RunError::Command)?;
    print_reply(&reply);
    Ok(())
}

/// Reads console commands until `quit`, end of input plus a shutdown
/// signal, or a shutdown signal.
///
/// Excluded from coverage - requires stdin and signal handling.
#[cfg(not(tarpaulin_include))]
async fn run_console<B, V, T>(controller: &Controller<B, V, T>) -> Result<(), RunError>
where
    B: DocumentStore,
    V: DomainView,
    T: Tick,
{
    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    println!("Type 'help' for commands.");

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return Ok(());
            }

            line = lines.next() => {
                match line {
                    Some(Ok(line)) => {
                        if !handle_line(controller, &line).await {
                            tracing::info!("Quit requested, stopping...");
                            return Ok(());
                        }
                    }
                    Some(Err(e)) => return Err(RunError::Console(e)),
                    None => {
                        // Input closed (e.g. running as a service); keep updating.
                        tracing::debug!("Console input closed, running until shutdown signal");
                        (&mut shutdown).await;
                        tracing::info!("Shutdown signal received, stopping...");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Handles one console line. Returns false when the console should exit.
///
/// Rejected commands print a message and change nothing.
async fn handle_line<B, V, T>(controller: &Controller<B, V, T>, line: &str) -> bool
where
    B: DocumentStore,
    V: DomainView,
    T: Tick,
{
    let action = match Action::parse(line) {
        Ok(Some(action)) => action,
        Ok(None) => return true,
        Err(e) => {
            eprintln!("{e}");
            return true;
        }
    };

    match controller.execute(action).await {
        Ok(reply) => print_reply(&reply),
        Err(e) if e.is_user_facing() => {
            eprintln!("{e}");
            true
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            true
        }
    }
}

/// Prints a reply. Returns false for [`Reply::Quit`].
fn print_reply(reply: &Reply) -> bool {
    match reply {
        Reply::Message(message) => println!("{message}"),
        Reply::Domains(domains) => print!("{}", format_table(domains)),
        Reply::Help => println!("{HELP}"),
        Reply::Quit => return false,
    }
    true
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
