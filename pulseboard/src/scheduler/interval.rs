//! Tokio interval driven scheduler.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{RefreshScheduler, TickCallback};

/// Default refresh cadence.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// One active run of the scheduler.
///
/// `gate` is held while a tick is delivered and flipped to `false` by `stop`,
/// so a tick that has already fired in the timer cannot reach the callback
/// once `stop` has returned.
struct Run {
    gate: Arc<Mutex<bool>>,
    token: CancellationToken,
}

impl Run {
    fn halt(self) {
        *self.gate.lock() = false;
        self.token.cancel();
    }
}

/// Scheduler that ticks on a fixed wall-clock interval.
///
/// The timer loop runs as a task on the supplied runtime. Missed ticks (for
/// example after the process was suspended) are skipped rather than replayed
/// in a burst.
pub struct IntervalScheduler {
    interval: Duration,
    runtime: Handle,
    current: Mutex<Option<Run>>,
}

impl IntervalScheduler {
    /// Create a scheduler ticking every `interval` on the given runtime.
    pub fn new(interval: Duration, runtime: Handle) -> Self {
        Self {
            interval,
            runtime,
            current: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl RefreshScheduler for IntervalScheduler {
    fn start(&self, on_tick: TickCallback) {
        let started = Instant::now();
        let mut current = self.current.lock();
        if let Some(previous) = current.take() {
            previous.halt();
        }

        let gate = Arc::new(Mutex::new(true));
        let token = CancellationToken::new();

        // Startup tick is delivered before the timer is armed
        on_tick();

        let period = self.interval;
        let Some(first_deadline) = started.checked_add(period) else {
            warn!(
                interval_secs = period.as_secs(),
                "Refresh interval out of range, periodic refresh disabled"
            );
            return;
        };

        let task_gate = Arc::clone(&gate);
        let task_token = token.clone();
        self.runtime.spawn(async move {
            let mut ticker = interval_at(first_deadline, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;

                    _ = task_token.cancelled() => break,

                    _ = ticker.tick() => {
                        let active = task_gate.lock();
                        if !*active {
                            break;
                        }
                        on_tick();
                    }
                }
            }

            debug!("Refresh scheduler loop exited");
        });

        debug!(interval_secs = period.as_secs_f64(), "Refresh scheduler started");
        *current = Some(Run { gate, token });
    }

    fn stop(&self) {
        if let Some(run) = self.current.lock().take() {
            run.halt();
            debug!("Refresh scheduler stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.current.lock().is_some()
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
