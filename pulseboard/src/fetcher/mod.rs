//! Snapshot retrieval.
//!
//! The [`SnapshotFetcher`] trait is the seam between the synchronization engine
//! and the transport. One call performs one attempt; there are no retries at
//! this layer. Every expected failure (connection, timeout, non-2xx status,
//! malformed body) comes back as a [`FetchError`] value.
//!
//! # Example
//!
//! ```ignore
//! use pulseboard::fetcher::{HttpSnapshotFetcher, SnapshotFetcher};
//!
//! let fetcher = HttpSnapshotFetcher::new("http://localhost:8080/api", Duration::from_secs(10))?;
//! match fetcher.fetch().await {
//!     Ok(snapshot) => println!("{} active users", snapshot.active_users_count),
//!     Err(e) => eprintln!("{} ({})", e, e.kind),
//! }
//! ```

mod error;
mod http;

pub use error::{FetchError, FetchErrorKind};
pub use http::{metrics_url, HttpSnapshotFetcher};

use std::future::Future;
use std::pin::Pin;

use crate::snapshot::MetricsSnapshot;

/// Boxed future returned by [`SnapshotFetcher::fetch`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<MetricsSnapshot, FetchError>> + Send + 'a>>;

/// Performs one asynchronous retrieval of a metrics snapshot.
///
/// Implementations must bound the attempt with a timeout so a single call
/// cannot hang forever, and must not panic for expected failure modes.
pub trait SnapshotFetcher: Send + Sync + 'static {
    /// Fetch the current snapshot from the service.
    fn fetch(&self) -> FetchFuture<'_>;
}
