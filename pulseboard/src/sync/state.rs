//! Synchronization state and its pure transition rules.
//!
//! [`SyncState`] is mutated only through the methods here, and only by the
//! engine while holding its lock. Keeping the rules free of I/O and timers
//! makes every transition testable with plain values.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::projection::Projection;
use crate::fetcher::FetchError;
use crate::snapshot::MetricsSnapshot;

/// Whether a fetch attempt is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// No attempt outstanding.
    #[default]
    Idle,
    /// Exactly one attempt outstanding.
    Fetching,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Idle => "idle",
            SyncStatus::Fetching => "fetching",
        }
    }
}

/// How the most recent applied attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    Failed,
}

/// Result of offering a tick to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new attempt was started under this generation.
    Admitted { generation: u64 },
    /// An attempt was already in flight; nothing changed.
    Dropped,
    /// The engine has been stopped; nothing changed.
    Stopped,
}

impl TickOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, TickOutcome::Admitted { .. })
    }
}

/// Result of offering a completed attempt to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The attempt belonged to the current generation and was applied.
    Applied(AttemptOutcome),
    /// The attempt was superseded; state was left untouched.
    Discarded,
}

/// Process-local state owned by one [`SyncEngine`](super::SyncEngine).
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    snapshot: Option<Arc<MetricsSnapshot>>,
    status: SyncStatus,
    last_error: Option<FetchError>,
    last_updated: Option<DateTime<Utc>>,
    last_outcome: Option<AttemptOutcome>,
    generation: u64,
    stopped: bool,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent successfully fetched snapshot.
    pub fn snapshot(&self) -> Option<&Arc<MetricsSnapshot>> {
        self.snapshot.as_ref()
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn last_outcome(&self) -> Option<AttemptOutcome> {
        self.last_outcome
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Offer a tick.
    ///
    /// Ticks arriving while an attempt is outstanding are dropped. Otherwise a
    /// new generation is opened, any previous error is cleared and the state
    /// moves to `Fetching`.
    pub fn admit(&mut self) -> TickOutcome {
        if self.stopped {
            return TickOutcome::Stopped;
        }
        if self.status == SyncStatus::Fetching {
            return TickOutcome::Dropped;
        }

        self.generation += 1;
        self.status = SyncStatus::Fetching;
        self.last_error = None;
        TickOutcome::Admitted {
            generation: self.generation,
        }
    }

    /// Offer the result of the attempt opened under `generation`.
    ///
    /// Results from any other generation are discarded without touching
    /// state. A failure keeps the previous snapshot and `last_updated`.
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<MetricsSnapshot, FetchError>,
        now: DateTime<Utc>,
    ) -> ApplyOutcome {
        if generation != self.generation {
            return ApplyOutcome::Discarded;
        }

        let outcome = match result {
            Ok(snapshot) => {
                self.snapshot = Some(Arc::new(snapshot));
                self.last_updated = Some(match self.last_updated {
                    Some(previous) if previous > now => previous,
                    _ => now,
                });
                self.last_error = None;
                AttemptOutcome::Succeeded
            }
            Err(error) => {
                self.last_error = Some(error);
                AttemptOutcome::Failed
            }
        };

        self.status = SyncStatus::Idle;
        self.last_outcome = Some(outcome);
        ApplyOutcome::Applied(outcome)
    }

    /// Teardown: invalidate any outstanding attempt and refuse further ticks.
    pub fn stop(&mut self) {
        self.generation += 1;
        self.status = SyncStatus::Idle;
        self.stopped = true;
    }

    /// Accept ticks again after [`stop`](Self::stop). Data is kept.
    pub fn resume(&mut self) {
        self.stopped = false;
    }

    /// Read-only view for presentation consumers.
    pub fn projection(&self) -> Projection {
        Projection {
            snapshot: self.snapshot.clone(),
            is_loading: self.status == SyncStatus::Fetching && self.snapshot.is_none(),
            error_message: self.last_error.as_ref().map(|e| e.message.clone()),
            last_updated: self.last_updated,
            status: self.status,
        }
    }
}
