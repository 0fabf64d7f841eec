//! Read-only view of the synchronization state.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::state::SyncStatus;
use crate::snapshot::{MetricsSnapshot, SessionSummary, TopPagesChart};

/// What presentation consumers see.
///
/// Re-published after every state transition. `is_loading` is true only while
/// the very first attempt is in flight; once any snapshot has been obtained,
/// background refreshes leave it false.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub snapshot: Option<Arc<MetricsSnapshot>>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub status: SyncStatus,
}

impl Projection {
    pub fn has_data(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn active_users_count(&self) -> Option<u64> {
        self.snapshot.as_ref().map(|s| s.active_users_count)
    }

    /// Session aggregates, empty when no snapshot is available yet.
    pub fn session_summary(&self) -> SessionSummary {
        self.snapshot
            .as_ref()
            .map(|s| SessionSummary::from_sessions(&s.active_sessions_by_user))
            .unwrap_or_default()
    }

    /// Top pages chart series, empty when no snapshot is available yet.
    pub fn top_pages_chart(&self) -> TopPagesChart {
        self.snapshot
            .as_ref()
            .map(|s| TopPagesChart::from_pages(&s.top_pages))
            .unwrap_or_default()
    }

    /// Server-side timestamp of the displayed snapshot.
    pub fn data_timestamp(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|s| s.timestamp)
    }
}
