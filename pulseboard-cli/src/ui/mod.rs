//! Terminal UI for Pulseboard.
//!
//! # Module Structure
//!
//! - `dashboard` - Full-screen dashboard, event handling and plain-text helpers
//! - `widgets` - One widget per dashboard panel

pub mod dashboard;
pub mod widgets;

pub use dashboard::{Dashboard, DashboardEvent};
