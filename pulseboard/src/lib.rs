//! Pulseboard - live traffic metrics dashboard engine
//!
//! This library keeps a read-only view of a remote metrics service up to date.
//! It polls `GET <base-url>/metrics` on a fixed cadence, serializes fetch
//! attempts so at most one is ever in flight, and reconciles arriving results
//! against a single owned state object without ever discarding the last good
//! snapshot on failure.
//!
//! # Architecture
//!
//! ```text
//! RefreshScheduler ──tick──► SyncEngine ──fetch──► SnapshotFetcher
//!                               │  ▲                    │
//!                               │  └──── Result ────────┘
//!                               ▼
//!                           Projection ──► presentation (CLI widgets)
//! ```
//!
//! The [`app::DashboardApp`] type wires these pieces together and owns their
//! lifecycle.

pub mod app;
pub mod config;
pub mod fetcher;
pub mod logging;
pub mod scheduler;
pub mod snapshot;
pub mod sync;
pub mod telemetry;

/// Crate version, shown in the dashboard title bar.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
