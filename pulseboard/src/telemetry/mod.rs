//! Engine telemetry for observability and user feedback.
//!
//! Lock-free atomic counters record what the synchronization engine does with
//! each tick and each fetch outcome. Views take a point-in-time copy.
//!
//! # Architecture
//!
//! ```text
//! SyncEngine ─────► EngineMetrics ─────► EngineTelemetry ─────► Views
//!                   (atomic counters)    (point-in-time copy)    (CLI, logs)
//! ```
//!
//! # Example
//!
//! ```
//! use pulseboard::telemetry::EngineMetrics;
//!
//! let metrics = EngineMetrics::new();
//! metrics.tick_admitted();
//! metrics.fetch_succeeded();
//! metrics.tick_dropped();
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.ticks_admitted, 1);
//! assert_eq!(snapshot.ticks_dropped, 1);
//! ```

mod metrics;
mod snapshot;

pub use metrics::EngineMetrics;
pub use snapshot::EngineTelemetry;
