//! The synchronization engine.
//!
//! Applies the [`SyncState`] transition rules under a single lock, runs
//! admitted fetch attempts as tasks on the runtime, and republishes the
//! [`Projection`] after every transition.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::projection::Projection;
use super::state::{ApplyOutcome, AttemptOutcome, SyncState, TickOutcome};
use crate::fetcher::{FetchError, SnapshotFetcher};
use crate::snapshot::MetricsSnapshot;
use crate::telemetry::EngineMetrics;

/// State shared between the engine handle and its in-flight attempts.
struct Shared {
    state: Mutex<SyncState>,
    projection_tx: watch::Sender<Projection>,
    metrics: Arc<EngineMetrics>,
}

impl Shared {
    /// Apply a finished attempt. One critical section per attempt.
    fn complete(
        &self,
        generation: u64,
        result: Result<MetricsSnapshot, FetchError>,
    ) -> ApplyOutcome {
        let mut state = self.state.lock();
        let had_snapshot = state.snapshot().is_some();
        let failure = result.as_ref().err().cloned();

        let outcome = state.apply(generation, result, Utc::now());
        match outcome {
            ApplyOutcome::Applied(AttemptOutcome::Succeeded) => {
                self.metrics.fetch_succeeded();
                if had_snapshot {
                    debug!(generation, "Metrics snapshot refreshed");
                } else {
                    info!(generation, "First metrics snapshot received");
                }
            }
            ApplyOutcome::Applied(AttemptOutcome::Failed) => {
                self.metrics.fetch_failed();
                if let Some(error) = failure {
                    warn!(
                        generation,
                        kind = %error.kind,
                        error = %error,
                        keeping_stale = had_snapshot,
                        "Metrics fetch failed"
                    );
                }
            }
            ApplyOutcome::Discarded => {
                self.metrics.result_discarded();
                debug!(
                    generation,
                    current = state.generation(),
                    "Discarding result from superseded attempt"
                );
                return outcome;
            }
        }

        self.projection_tx.send_replace(state.projection());
        outcome
    }
}

/// An admitted attempt that has not reported back yet.
///
/// If the task running it goes away without a result (panic in the fetcher,
/// runtime shutdown), dropping this settles the attempt as a failure so the
/// engine never stays stuck in `Fetching`.
struct PendingAttempt {
    shared: Arc<Shared>,
    generation: u64,
    settled: bool,
}

impl PendingAttempt {
    fn settle(mut self, result: Result<MetricsSnapshot, FetchError>) {
        self.settled = true;
        self.shared.complete(self.generation, result);
    }
}

impl Drop for PendingAttempt {
    fn drop(&mut self) {
        if !self.settled {
            self.shared.complete(
                self.generation,
                Err(FetchError::network("fetch attempt aborted before completion")),
            );
        }
    }
}

/// Owns the [`SyncState`] and serializes fetch attempts against it.
///
/// Cloning yields another handle to the same engine. The engine never runs
/// two attempts at once: ticks arriving while an attempt is outstanding are
/// dropped, and results from superseded generations never touch state.
///
/// # Example
///
/// ```ignore
/// use pulseboard::sync::SyncEngine;
///
/// let engine = SyncEngine::new(Arc::new(fetcher), Handle::current());
/// let mut updates = engine.subscribe();
///
/// engine.tick();
/// updates.changed().await?;
/// println!("{:?}", updates.borrow().active_users_count());
///
/// engine.stop();
/// ```
#[derive(Clone)]
pub struct SyncEngine {
    shared: Arc<Shared>,
    fetcher: Arc<dyn SnapshotFetcher>,
    runtime: Handle,
}

impl SyncEngine {
    /// Create an engine that runs attempts on the given runtime.
    pub fn new(fetcher: Arc<dyn SnapshotFetcher>, runtime: Handle) -> Self {
        Self::with_metrics(fetcher, runtime, Arc::new(EngineMetrics::new()))
    }

    /// Create an engine that records into existing metrics.
    pub fn with_metrics(
        fetcher: Arc<dyn SnapshotFetcher>,
        runtime: Handle,
        metrics: Arc<EngineMetrics>,
    ) -> Self {
        let state = SyncState::new();
        let (projection_tx, _) = watch::channel(state.projection());

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                projection_tx,
                metrics,
            }),
            fetcher,
            runtime,
        }
    }

    /// Offer a scheduler tick.
    ///
    /// Returns immediately. When admitted, the fetch runs in the background
    /// and its result is applied when it arrives.
    pub fn tick(&self) -> TickOutcome {
        let mut state = self.shared.state.lock();
        let outcome = state.admit();

        let generation = match outcome {
            TickOutcome::Admitted { generation } => generation,
            TickOutcome::Dropped => {
                self.shared.metrics.tick_dropped();
                debug!(
                    generation = state.generation(),
                    "Tick dropped, fetch already in flight"
                );
                return outcome;
            }
            TickOutcome::Stopped => {
                debug!("Tick ignored, engine stopped");
                return outcome;
            }
        };

        self.shared.metrics.tick_admitted();
        self.shared.projection_tx.send_replace(state.projection());
        drop(state);

        debug!(generation, "Fetch attempt admitted");

        let pending = PendingAttempt {
            shared: Arc::clone(&self.shared),
            generation,
            settled: false,
        };
        let fetcher = Arc::clone(&self.fetcher);
        self.runtime.spawn(async move {
            let result = fetcher.fetch().await;
            pending.settle(result);
        });

        outcome
    }

    /// Manual refresh. Same semantics as a scheduler tick, including the
    /// in-flight drop rule.
    pub fn refresh(&self) -> TickOutcome {
        self.tick()
    }

    /// Teardown.
    ///
    /// Invalidates any outstanding attempt and refuses further ticks. The
    /// network call of an outstanding attempt may still run to completion,
    /// but its result is discarded.
    pub fn stop(&self) {
        let mut state = self.shared.state.lock();
        if state.is_stopped() {
            return;
        }
        state.stop();
        self.shared.projection_tx.send_replace(state.projection());
        info!(generation = state.generation(), "Sync engine stopped");
    }

    /// Accept ticks again after [`stop`](Self::stop). The last snapshot is kept.
    pub fn resume(&self) {
        let mut state = self.shared.state.lock();
        if state.is_stopped() {
            state.resume();
            info!(generation = state.generation(), "Sync engine resumed");
        }
    }

    /// Current read-only view.
    pub fn projection(&self) -> Projection {
        self.shared.state.lock().projection()
    }

    /// Receive a new [`Projection`] after every state transition.
    pub fn subscribe(&self) -> watch::Receiver<Projection> {
        self.shared.projection_tx.subscribe()
    }

    /// Copy of the full internal state, for diagnostics and tests.
    pub fn state(&self) -> SyncState {
        self.shared.state.lock().clone()
    }

    pub fn metrics(&self) -> Arc<EngineMetrics> {
        Arc::clone(&self.shared.metrics)
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("state", &*self.shared.state.lock())
            .finish_non_exhaustive()
    }
}
