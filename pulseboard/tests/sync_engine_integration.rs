//! Integration tests for the refresh and synchronization flow.
//!
//! These tests drive a [`DashboardApp`] with a hand-fired scheduler and a
//! fetcher whose results are released by the test, covering:
//! - at most one fetch in flight under tick pressure
//! - stale data kept across failures
//! - first-load indicator semantics
//! - teardown discarding late results
//!
//! Run with: `cargo test --test sync_engine_integration`

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use pulseboard::app::DashboardApp;
use pulseboard::config::DashboardConfig;
use pulseboard::fetcher::{FetchError, FetchFuture, SnapshotFetcher};
use pulseboard::scheduler::ManualScheduler;
use pulseboard::snapshot::MetricsSnapshot;
use pulseboard::sync::{SyncStatus, TickOutcome};

// ============================================================================
// Helpers
// ============================================================================

type FetchResult = Result<MetricsSnapshot, FetchError>;

/// Fetcher that blocks every attempt until the test releases a result.
#[derive(Default)]
struct GatedFetcher {
    waiting: Mutex<VecDeque<oneshot::Sender<FetchResult>>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl GatedFetcher {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Resolve the oldest waiting attempt.
    fn release(&self, result: FetchResult) {
        let sender = self
            .waiting
            .lock()
            .pop_front()
            .expect("no fetch attempt is waiting");
        let _ = sender.send(result);
    }

    /// Wait until `fetch` has been invoked `count` times.
    async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("fetch was not invoked in time");
    }
}

impl SnapshotFetcher for GatedFetcher {
    fn fetch(&self) -> FetchFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let (tx, rx) = oneshot::channel();
        self.waiting.lock().push_back(tx);

        Box::pin(async move {
            let result = rx
                .await
                .unwrap_or_else(|_| Err(FetchError::network("gate closed")));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        })
    }
}

fn snapshot_json(body: &str) -> MetricsSnapshot {
    MetricsSnapshot::from_json(body.as_bytes()).expect("valid snapshot json")
}

fn sample_snapshot(users: u64) -> MetricsSnapshot {
    snapshot_json(&format!(
        r#"{{"activeUsersCount":{},"topPages":[],"activeSessionsByUser":{{}},"timestamp":"2024-05-01T12:00:00Z"}}"#,
        users
    ))
}

fn start_app() -> (DashboardApp, Arc<ManualScheduler>, Arc<GatedFetcher>) {
    let scheduler = Arc::new(ManualScheduler::new());
    let fetcher = Arc::new(GatedFetcher::default());
    let app = DashboardApp::with_components(
        DashboardConfig::default(),
        fetcher.clone(),
        scheduler.clone(),
        Handle::current(),
    );
    (app, scheduler, fetcher)
}

/// Wait until no attempt is in flight.
async fn settle(app: &DashboardApp) {
    let mut rx = app.subscribe();
    tokio::time::timeout(
        Duration::from_secs(5),
        rx.wait_for(|p| p.status == SyncStatus::Idle),
    )
    .await
    .expect("engine did not settle in time")
    .expect("engine dropped");
}

// ============================================================================
// Integration Tests
// ============================================================================

/// Ticks arriving during an outstanding attempt never start a second one.
#[tokio::test]
async fn test_at_most_one_fetch_in_flight() {
    let (app, scheduler, fetcher) = start_app();
    fetcher.wait_for_calls(1).await;

    for _ in 0..10 {
        assert!(scheduler.fire());
    }
    assert_eq!(app.refresh(), TickOutcome::Dropped);

    fetcher.release(Ok(sample_snapshot(1)));
    settle(&app).await;

    assert_eq!(fetcher.calls(), 1);
    assert_eq!(fetcher.max_in_flight(), 1);
    assert_eq!(app.telemetry().ticks_dropped, 11);

    // Next tick after completion is admitted
    assert!(app.refresh().is_admitted());
    fetcher.wait_for_calls(2).await;
    fetcher.release(Ok(sample_snapshot(2)));
    settle(&app).await;

    assert_eq!(app.projection().active_users_count(), Some(2));
    assert_eq!(fetcher.max_in_flight(), 1);
}

/// A failure after a success keeps the old snapshot and timestamp.
#[tokio::test]
async fn test_stale_data_preserved_on_failure() {
    let (app, scheduler, fetcher) = start_app();
    fetcher.wait_for_calls(1).await;
    fetcher.release(Ok(sample_snapshot(42)));
    settle(&app).await;

    let before = app.projection();
    assert_eq!(before.active_users_count(), Some(42));
    assert!(before.error_message.is_none());

    scheduler.fire();
    fetcher.wait_for_calls(2).await;
    fetcher.release(Err(FetchError::status(500)));
    settle(&app).await;

    let after = app.projection();
    assert_eq!(after.active_users_count(), Some(42));
    assert_eq!(after.last_updated, before.last_updated);
    assert_eq!(
        after.error_message.as_deref(),
        Some("request failed with status code 500")
    );
    assert!(!after.is_loading);
}

/// The loading indicator shows only while no snapshot has ever arrived.
#[tokio::test]
async fn test_loading_only_before_first_snapshot() {
    let (app, scheduler, fetcher) = start_app();
    assert!(app.projection().is_loading);

    fetcher.wait_for_calls(1).await;
    fetcher.release(Err(FetchError::network("connection refused")));
    settle(&app).await;

    let failed = app.projection();
    assert!(!failed.is_loading);
    assert!(!failed.has_data());
    assert_eq!(failed.error_message.as_deref(), Some("connection refused"));

    // Still no data: the retry counts as a first load
    scheduler.fire();
    assert!(app.projection().is_loading);
    fetcher.wait_for_calls(2).await;
    fetcher.release(Ok(sample_snapshot(3)));
    settle(&app).await;

    // Background refresh with data on screen
    scheduler.fire();
    let refreshing = app.projection();
    assert_eq!(refreshing.status, SyncStatus::Fetching);
    assert!(!refreshing.is_loading);
    assert!(refreshing.has_data());

    fetcher.wait_for_calls(3).await;
    fetcher.release(Ok(sample_snapshot(4)));
    settle(&app).await;
}

/// Results arriving after shutdown never reach the projection.
#[tokio::test]
async fn test_shutdown_discards_late_result() {
    let (app, scheduler, fetcher) = start_app();
    fetcher.wait_for_calls(1).await;

    let generation_before = app.engine().state().generation();
    app.shutdown();
    assert!(!scheduler.fire());

    fetcher.release(Ok(sample_snapshot(99)));
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    let projection = app.projection();
    assert!(!projection.has_data());
    assert!(!projection.is_loading);
    assert_eq!(app.telemetry().results_discarded, 1);

    // Restarting opens a strictly newer generation
    app.restart();
    let generation_after = app.engine().state().generation();
    assert!(generation_after > generation_before + 1);

    fetcher.wait_for_calls(2).await;
    fetcher.release(Ok(sample_snapshot(7)));
    settle(&app).await;
    assert_eq!(app.projection().active_users_count(), Some(7));
}

/// A full snapshot flows through to the derived views.
#[tokio::test]
async fn test_snapshot_reaches_derived_views() {
    let (app, _scheduler, fetcher) = start_app();
    let mut updates = app.subscribe();

    fetcher.wait_for_calls(1).await;
    fetcher.release(Ok(snapshot_json(
        r#"{
            "activeUsersCount": 42,
            "topPages": [
                {"url": "/home", "viewCount": 10},
                {"url": "/pricing", "viewCount": 4}
            ],
            "activeSessionsByUser": {"alice": 2, "bob": 1},
            "timestamp": "2024-05-01T12:00:00Z"
        }"#,
    )));

    let projection = tokio::time::timeout(
        Duration::from_secs(5),
        updates.wait_for(|p| p.has_data()),
    )
    .await
    .expect("no snapshot published")
    .expect("engine dropped")
    .clone();

    assert_eq!(projection.active_users_count(), Some(42));

    let sessions = projection.session_summary();
    assert_eq!(sessions.total_sessions, 3);
    assert_eq!(sessions.user_count, 2);
    assert_eq!(sessions.ranking[0].user_id, "alice");
    assert_eq!(sessions.ranking[0].sessions, 2);

    let chart = projection.top_pages_chart();
    assert_eq!(chart.labels, vec!["/home", "/pricing"]);
    assert_eq!(chart.values, vec![10, 4]);
}
