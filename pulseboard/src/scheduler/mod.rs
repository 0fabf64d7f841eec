//! Refresh scheduling.
//!
//! A [`RefreshScheduler`] emits ticks: once immediately on `start`, then on a
//! fixed wall-clock cadence until `stop`. It does NOT wait for the work a tick
//! triggers to finish before arming the next one, so overlapping ticks are
//! expected and must be handled by the consumer (see [`crate::sync`]).
//!
//! Two implementations are provided:
//!
//! - [`IntervalScheduler`] - tokio interval driven, used in production
//! - [`ManualScheduler`] - fires only when told to, for deterministic tests

mod interval;
mod manual;

pub use interval::{IntervalScheduler, DEFAULT_REFRESH_INTERVAL};
pub use manual::ManualScheduler;

use std::sync::Arc;

/// Callback invoked on every tick.
///
/// Must be cheap and non-blocking; it runs on the scheduler's own task. It
/// must not call back into the scheduler's `start` or `stop`.
pub type TickCallback = Arc<dyn Fn() + Send + Sync>;

/// Source of refresh ticks.
pub trait RefreshScheduler: Send + Sync {
    /// Invoke `on_tick` once immediately, then on every interval.
    ///
    /// Starting an already running scheduler replaces the previous callback
    /// (the previous run is stopped first).
    fn start(&self, on_tick: TickCallback);

    /// Stop ticking.
    ///
    /// Idempotent. Once this returns, `on_tick` is never invoked again for the
    /// current run, including a tick that was already pending.
    fn stop(&self);

    /// Whether a run is currently active.
    fn is_running(&self) -> bool;
}
