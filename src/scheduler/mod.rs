//! Recurring update scheduling.
//!
//! This module provides:
//! - The unit of periodic work ([`Tick`])
//! - The owner of the single recurring timer ([`Scheduler`])
//! - The production update cycle ([`UpdateCycle`])
//! - The "last/next update" display hook ([`StatusSink`], [`LogStatusSink`])
//!
//! # Timer Invariant
//!
//! A [`Scheduler`] owns at most one live timer task. [`Scheduler::start`]
//! stops the previous task and waits for it to finish before running the
//! immediate tick and arming the replacement, all under one lock. No tick of
//! the old period can fire after the new one is armed, and an old tick that
//! was already running never overlaps the new immediate tick.

mod cycle;
mod status;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

#[cfg(test)]
mod cycle_tests;

pub use cycle::UpdateCycle;
pub use status::{
    DEFAULT_STATUS_TEMPLATE, LogStatusSink, StatusFormatter, StatusSink, UpdateStatus,
};

use std::sync::Arc;

use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::model::Interval;

/// One update cycle, run immediately on start and then once per period.
///
/// Implementations handle their own errors: a failing tick must never stop
/// the following ones.
pub trait Tick: Send + Sync + 'static {
    /// Runs one cycle for a timer with the given interval.
    fn run(&self, interval: Interval) -> impl std::future::Future<Output = ()> + Send;
}

/// The armed recurring task.
#[derive(Debug)]
struct Timer {
    interval: Interval,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Timer {
    /// Spawns a task that runs `tick` every `interval`, first one period from now.
    fn arm<T: Tick>(tick: Arc<T>, interval: Interval) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let period = interval.period();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    // Also fires when the sender is dropped with the scheduler.
                    _ = &mut stopped => break,

                    _ = ticker.tick() => tick.run(interval).await,
                }
            }
        });

        Self {
            interval,
            stop,
            task,
        }
    }

    /// Stops the task and waits until it has exited.
    ///
    /// A tick that is already running completes first.
    async fn cancel(self) {
        // The task may already be gone; nothing to signal then.
        let _ = self.stop.send(());

        if let Err(e) = self.task.await {
            if e.is_panic() {
                tracing::error!("Update timer task panicked: {e}");
            }
        }
    }
}

/// Owner of the single recurring update timer.
///
/// Two states: idle (no timer) and running (one timer with a period).
/// There is no user-facing stop; the timer lives until [`shutdown`](Self::shutdown)
/// at process exit or until the scheduler is dropped.
///
/// # Example
///
/// ```ignore
/// let scheduler = Scheduler::new(cycle);
/// scheduler.start(Interval::new(5)?).await;   // immediate tick, then every 5 minutes
/// scheduler.start(Interval::new(10)?).await;  // replaces the 5 minute timer
/// ```
#[derive(Debug)]
pub struct Scheduler<T> {
    tick: Arc<T>,
    timer: Mutex<Option<Timer>>,
}

impl<T: Tick> Scheduler<T> {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new(tick: T) -> Self {
        Self {
            tick: Arc::new(tick),
            timer: Mutex::new(None),
        }
    }

    /// Returns the scheduled work.
    #[must_use]
    pub fn tick(&self) -> &T {
        &self.tick
    }

    /// (Re)starts the timer with a new interval.
    ///
    /// Cancels any running timer, runs one cycle immediately, then arms a new
    /// timer repeating every `interval`. Concurrent calls are serialized.
    pub async fn start(&self, interval: Interval) {
        let mut slot = self.timer.lock().await;

        if let Some(previous) = slot.take() {
            tracing::debug!("Cancelling {} update timer", previous.interval);
            previous.cancel().await;
        }

        self.tick.run(interval).await;

        *slot = Some(Timer::arm(Arc::clone(&self.tick), interval));
        tracing::info!("Updates scheduled every {interval}");
    }

    /// Returns the interval of the running timer, if any.
    pub async fn period(&self) -> Option<Interval> {
        self.timer.lock().await.as_ref().map(|t| t.interval)
    }

    /// Returns true if a timer is armed.
    pub async fn is_running(&self) -> bool {
        self.timer.lock().await.is_some()
    }

    /// Stops the timer for process exit.
    pub async fn shutdown(&self) {
        if let Some(timer) = self.timer.lock().await.take() {
            timer.cancel().await;
            tracing::debug!("Update timer stopped");
        }
    }
}
