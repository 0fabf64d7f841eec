//! Derived-value rules applied by presentation consumers.
//!
//! These are pure functions of a snapshot. They live next to the model so
//! every consumer (TUI widgets, headless output, tests) aggregates the same
//! way.

use std::collections::BTreeMap;

use super::model::PageView;

/// One entry of the active-user ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedUser {
    pub user_id: String,
    pub sessions: u32,
}

/// Aggregates over `activeSessionsByUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Sum of all per-user session counts.
    pub total_sessions: u64,

    /// Number of distinct users with at least one session.
    pub user_count: usize,

    /// Users ordered by session count, highest first.
    ///
    /// Ties keep the map's iteration order. Callers must not rely on which
    /// tied user comes first.
    pub ranking: Vec<RankedUser>,
}

impl SessionSummary {
    pub fn from_sessions(sessions: &BTreeMap<String, u32>) -> Self {
        let total_sessions = sessions.values().map(|&count| u64::from(count)).sum();

        let mut ranking: Vec<RankedUser> = sessions
            .iter()
            .map(|(user_id, &sessions)| RankedUser {
                user_id: user_id.clone(),
                sessions,
            })
            .collect();
        // sort_by is stable, so equal counts stay in key order
        ranking.sort_by(|a, b| b.sessions.cmp(&a.sessions));

        Self {
            total_sessions,
            user_count: sessions.len(),
            ranking,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.user_count == 0
    }
}

/// Bar chart series for the top pages widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopPagesChart {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl TopPagesChart {
    /// Pull categories and values positionally, in service-delivered order.
    pub fn from_pages(pages: &[PageView]) -> Self {
        Self {
            labels: pages.iter().map(|p| p.url.clone()).collect(),
            values: pages.iter().map(|p| p.view_count).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest value in the series, used to scale bars.
    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Format a count with a singular or plural noun: `1 session`, `3 sessions`.
pub fn pluralize(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
