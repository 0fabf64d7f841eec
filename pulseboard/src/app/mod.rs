//! Application bootstrap and lifecycle management.
//!
//! [`DashboardApp`] wires the HTTP fetcher, the sync engine and the refresh
//! scheduler together and guarantees they are torn down in the right order.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      DashboardApp                         │
//! │                                                           │
//! │  IntervalScheduler ──on_tick──► SyncEngine::tick()        │
//! │                                   │                       │
//! │                                   ├──► HttpSnapshotFetcher│
//! │                                   ▼                       │
//! │                          watch::Receiver<Projection>      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Shutdown stops the scheduler first, then invalidates any in-flight
//! attempt, so no result can be applied after `shutdown` returns.
//!
//! # Example
//!
//! ```ignore
//! use pulseboard::app::DashboardApp;
//! use pulseboard::config::DashboardConfig;
//!
//! let app = DashboardApp::start_sync(DashboardConfig::default())?;
//! let mut updates = app.subscribe();
//!
//! // ... render updates.borrow() ...
//!
//! app.shutdown();
//! ```

mod bootstrap;
mod error;

pub use bootstrap::DashboardApp;
pub use error::AppError;
