//! Metrics snapshot data model and derived views.
//!
//! A [`MetricsSnapshot`] is one complete, internally consistent set of metric
//! values as computed by the service at a single instant. The derived views in
//! this module ([`SessionSummary`], [`TopPagesChart`]) are the aggregation
//! rules every presentation consumer applies to that shape.

mod derived;
mod model;

pub use derived::{pluralize, RankedUser, SessionSummary, TopPagesChart};
pub use model::{MetricsSnapshot, PageView};
