//! Atomic counters updated by the synchronization engine.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::snapshot::EngineTelemetry;

/// Counters describing engine activity since creation.
#[derive(Debug)]
pub struct EngineMetrics {
    started_at: Instant,
    ticks_admitted: AtomicU64,
    ticks_dropped: AtomicU64,
    fetches_succeeded: AtomicU64,
    fetches_failed: AtomicU64,
    results_discarded: AtomicU64,
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            ticks_admitted: AtomicU64::new(0),
            ticks_dropped: AtomicU64::new(0),
            fetches_succeeded: AtomicU64::new(0),
            fetches_failed: AtomicU64::new(0),
            results_discarded: AtomicU64::new(0),
        }
    }

    /// A tick started a new fetch attempt.
    pub fn tick_admitted(&self) {
        self.ticks_admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// A tick arrived while an attempt was in flight.
    pub fn tick_dropped(&self) {
        self.ticks_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_succeeded(&self) {
        self.fetches_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetches_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// A result arrived for a superseded generation and was ignored.
    pub fn result_discarded(&self) {
        self.results_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> EngineTelemetry {
        EngineTelemetry {
            uptime: self.started_at.elapsed(),
            ticks_admitted: self.ticks_admitted.load(Ordering::Relaxed),
            ticks_dropped: self.ticks_dropped.load(Ordering::Relaxed),
            fetches_succeeded: self.fetches_succeeded.load(Ordering::Relaxed),
            fetches_failed: self.fetches_failed.load(Ordering::Relaxed),
            results_discarded: self.results_discarded.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_metrics_start_at_zero() {
        let snapshot = EngineMetrics::new().snapshot();
        assert_eq!(snapshot.ticks_admitted, 0);
        assert_eq!(snapshot.ticks_dropped, 0);
        assert_eq!(snapshot.fetches_succeeded, 0);
        assert_eq!(snapshot.fetches_failed, 0);
        assert_eq!(snapshot.results_discarded, 0);
    }

    #[test]
    fn test_counters_increment_independently() {
        let metrics = EngineMetrics::new();
        metrics.tick_admitted();
        metrics.tick_admitted();
        metrics.tick_dropped();
        metrics.fetch_failed();
        metrics.result_discarded();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.ticks_admitted, 2);
        assert_eq!(snapshot.ticks_dropped, 1);
        assert_eq!(snapshot.fetches_succeeded, 0);
        assert_eq!(snapshot.fetches_failed, 1);
        assert_eq!(snapshot.results_discarded, 1);
    }

    #[test]
    fn test_thread_safe_counting() {
        use std::thread;

        let metrics = Arc::new(EngineMetrics::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let m = Arc::clone(&metrics);
            handles.push(thread::spawn(move || {
                for _ in 0..50 {
                    m.tick_dropped();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.snapshot().ticks_dropped, 400);
    }
}
