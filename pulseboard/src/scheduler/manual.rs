//! Hand-driven scheduler for tests and embedding.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::{RefreshScheduler, TickCallback};

/// Scheduler that only ticks when [`fire`](ManualScheduler::fire) is called.
///
/// Honors the same contract as the interval scheduler: one tick on `start`,
/// nothing after `stop`. Lets admission-control logic be exercised without
/// real timers.
///
/// # Example
///
/// ```
/// use pulseboard::scheduler::{ManualScheduler, RefreshScheduler};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let scheduler = ManualScheduler::new();
/// let ticks = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&ticks);
///
/// scheduler.start(Arc::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
/// scheduler.fire();
/// scheduler.stop();
/// assert!(!scheduler.fire());
///
/// assert_eq!(ticks.load(Ordering::SeqCst), 2);
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    callback: Mutex<Option<TickCallback>>,
    starts: AtomicUsize,
    stops: AtomicUsize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one tick. Returns `false` if the scheduler is not running.
    pub fn fire(&self) -> bool {
        let callback = self.callback.lock().clone();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Number of times `start` has been called.
    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Number of times `stop` actually halted a run.
    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl RefreshScheduler for ManualScheduler {
    fn start(&self, on_tick: TickCallback) {
        self.starts.fetch_add(1, Ordering::SeqCst);
        *self.callback.lock() = Some(on_tick.clone());
        on_tick();
    }

    fn stop(&self) {
        if self.callback.lock().take().is_some() {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_running(&self) -> bool {
        self.callback.lock().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_fire_before_start_is_noop() {
        let scheduler = ManualScheduler::new();
        assert!(!scheduler.fire());
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_start_ticks_once() {
        let scheduler = ManualScheduler::new();
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);

        scheduler.start(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.start_count(), 1);
        assert!(scheduler.is_running());
    }

    #[test]
    fn test_stop_counts_only_real_halts() {
        let scheduler = ManualScheduler::new();
        scheduler.start(Arc::new(|| {}));

        scheduler.stop();
        scheduler.stop();

        assert_eq!(scheduler.stop_count(), 1);
        assert!(!scheduler.fire());
    }
}
