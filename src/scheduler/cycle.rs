//! The production update cycle.

use std::sync::Arc;

use crate::model::Interval;
use crate::store::{ConfigStore, DocumentStore};
use crate::time::{Clock, SystemClock};
use crate::update::UpdateDispatcher;

use super::Tick;
use super::status::{StatusSink, UpdateStatus};

/// One update cycle: show the status line, then push the current
/// configuration to the provider.
///
/// Failures are logged and never propagate, so the timer keeps running.
#[derive(Debug)]
pub struct UpdateCycle<B, D, N, C = SystemClock> {
    store: Arc<ConfigStore<B>>,
    dispatcher: D,
    status: N,
    clock: C,
    dry_run: bool,
}

impl<B, D, N> UpdateCycle<B, D, N, SystemClock> {
    /// Creates a cycle reading from `store` and sending through `dispatcher`.
    #[must_use]
    pub const fn new(store: Arc<ConfigStore<B>>, dispatcher: D, status: N) -> Self {
        Self {
            store,
            dispatcher,
            status,
            clock: SystemClock,
            dry_run: false,
        }
    }
}

impl<B, D, N, C> UpdateCycle<B, D, N, C> {
    /// Replaces the wall clock used for the status line.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> UpdateCycle<B, D, N, C2> {
        UpdateCycle {
            store: self.store,
            dispatcher: self.dispatcher,
            status: self.status,
            clock,
            dry_run: self.dry_run,
        }
    }

    /// Skips the provider requests, logging what would have been sent.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Returns the status sink.
    #[must_use]
    pub const fn status(&self) -> &N {
        &self.status
    }
}

impl<B, D, N, C> Tick for UpdateCycle<B, D, N, C>
where
    B: DocumentStore + 'static,
    D: UpdateDispatcher + 'static,
    N: StatusSink + 'static,
    C: Clock + 'static,
{
    async fn run(&self, interval: Interval) {
        self.status
            .show(&UpdateStatus::new(self.clock.now(), interval));

        let config = match self.store.get().await {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Cannot read configuration for update: {e}");
                return;
            }
        };

        if self.dry_run {
            let (enabled, disabled) = crate::model::Config::partition_names(&config.domains);
            tracing::info!(
                "[dry-run] Would enable [{}] and disable [{}]",
                enabled.join(","),
                disabled.join(",")
            );
            return;
        }

        if config.token.is_empty() {
            tracing::warn!("No token configured; the provider will reject this update");
        }

        let report = self
            .dispatcher
            .push_update(&config.token, &config.domains)
            .await;

        for (kind, error) in report.failures() {
            tracing::error!("Update ({kind}) failed: {error}");
        }
        if report.is_success() {
            tracing::debug!("Update cycle completed for {} domain(s)", config.domains.len());
        }
    }
}
