//! Tests for `UpdateCycle`.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use super::{StatusSink, Tick, UpdateCycle, UpdateStatus};
use crate::model::{Config, Domain, DomainName, Interval};
use crate::store::ConfigStore;
use crate::store::mock::MockDocumentStore;
use crate::time::Clock;
use crate::update::{DispatchReport, HttpError, UpdateDispatcher, UpdateError};

/// Dispatcher that records what it was asked to push.
#[derive(Debug, Default)]
struct RecordingDispatcher {
    pushes: Mutex<Vec<(String, Vec<Domain>)>>,
    fail: bool,
}

impl UpdateDispatcher for RecordingDispatcher {
    async fn push_update(&self, token: &str, domains: &[Domain]) -> DispatchReport {
        self.pushes
            .lock()
            .unwrap()
            .push((token.to_string(), domains.to_vec()));
        let outcome = || {
            if self.fail {
                Err(UpdateError::Http(HttpError::Timeout))
            } else {
                Ok(())
            }
        };
        DispatchReport {
            enabled: outcome(),
            disabled: outcome(),
        }
    }
}

#[derive(Debug, Default)]
struct RecordingSink {
    shown: Mutex<Vec<UpdateStatus>>,
}

impl StatusSink for RecordingSink {
    fn show(&self, status: &UpdateStatus) {
        self.shown.lock().unwrap().push(*status);
    }
}

struct FixedClock(SystemTime);

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

fn domain(name: &str, enabled: bool) -> Domain {
    Domain {
        name: DomainName::new(name).unwrap(),
        enabled,
    }
}

async fn loaded_store() -> Arc<ConfigStore<MockDocumentStore>> {
    let config = Config {
        token: "T".to_string(),
        interval: Interval::new(5).unwrap(),
        domains: vec![domain("a", true), domain("b", false)],
    };
    let store = Arc::new(ConfigStore::new(MockDocumentStore::with_loaded(config)));
    store.load().await.unwrap();
    store
}

#[tokio::test]
async fn pushes_current_token_and_domains() {
    let store = loaded_store().await;
    let cycle = UpdateCycle::new(
        Arc::clone(&store),
        RecordingDispatcher::default(),
        RecordingSink::default(),
    );

    cycle.run(Interval::new(5).unwrap()).await;

    let pushes = cycle.dispatcher().pushes.lock().unwrap().clone();
    assert_eq!(
        pushes,
        vec![("T".to_string(), vec![domain("a", true), domain("b", false)])]
    );
}

#[tokio::test]
async fn reads_latest_configuration_each_run() {
    let store = loaded_store().await;
    let cycle = UpdateCycle::new(
        Arc::clone(&store),
        RecordingDispatcher::default(),
        RecordingSink::default(),
    );

    cycle.run(Interval::DEFAULT).await;
    store.set_token("rotated").await.unwrap();
    cycle.run(Interval::DEFAULT).await;

    let pushes = cycle.dispatcher().pushes.lock().unwrap().clone();
    assert_eq!(pushes[1].0, "rotated");
}

#[tokio::test]
async fn shows_status_with_next_one_interval_later() {
    let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
    let cycle = UpdateCycle::new(
        loaded_store().await,
        RecordingDispatcher::default(),
        RecordingSink::default(),
    )
    .with_clock(FixedClock(now));

    cycle.run(Interval::new(10).unwrap()).await;

    let shown = cycle.status().shown.lock().unwrap().clone();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].last, now);
    assert_eq!(shown[0].next, now + Duration::from_secs(600));
}

#[tokio::test]
async fn dry_run_skips_dispatch_but_shows_status() {
    let cycle = UpdateCycle::new(
        loaded_store().await,
        RecordingDispatcher::default(),
        RecordingSink::default(),
    )
    .with_dry_run(true);

    cycle.run(Interval::DEFAULT).await;

    assert!(cycle.dispatcher().pushes.lock().unwrap().is_empty());
    assert_eq!(cycle.status().shown.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn dispatch_failure_does_not_panic() {
    let cycle = UpdateCycle::new(
        loaded_store().await,
        RecordingDispatcher {
            fail: true,
            ..RecordingDispatcher::default()
        },
        RecordingSink::default(),
    );

    cycle.run(Interval::DEFAULT).await;
    cycle.run(Interval::DEFAULT).await;

    assert_eq!(cycle.dispatcher().pushes.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn unloaded_store_skips_dispatch() {
    let store = Arc::new(ConfigStore::new(MockDocumentStore::not_found()));
    let cycle = UpdateCycle::new(
        store,
        RecordingDispatcher::default(),
        RecordingSink::default(),
    );

    cycle.run(Interval::DEFAULT).await;

    assert!(cycle.dispatcher().pushes.lock().unwrap().is_empty());
}
