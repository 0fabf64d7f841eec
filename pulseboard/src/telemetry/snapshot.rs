//! Point-in-time copy of engine counters.

use std::time::Duration;

/// Engine counters at one instant, safe to hand to views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineTelemetry {
    pub uptime: Duration,
    pub ticks_admitted: u64,
    pub ticks_dropped: u64,
    pub fetches_succeeded: u64,
    pub fetches_failed: u64,
    pub results_discarded: u64,
}

impl EngineTelemetry {
    /// Completed attempts (success or failure) that were applied.
    pub fn fetches_completed(&self) -> u64 {
        self.fetches_succeeded + self.fetches_failed
    }

    /// Fraction of applied attempts that succeeded, 0.0 when none completed.
    pub fn success_rate(&self) -> f64 {
        let completed = self.fetches_completed();
        if completed == 0 {
            0.0
        } else {
            self.fetches_succeeded as f64 / completed as f64
        }
    }

    /// Uptime as HH:MM:SS or MM:SS.
    pub fn uptime_human(&self) -> String {
        let secs = self.uptime.as_secs();
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        let secs = secs % 60;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}", hours, mins, secs)
        } else {
            format!("{:02}:{:02}", mins, secs)
        }
    }
}
