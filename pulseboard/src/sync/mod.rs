//! Refresh-and-synchronization state machine.
//!
//! # State Machine
//!
//! ```text
//! Idle --[tick]--> Fetching            (generation += 1)
//! Fetching --[tick]--> Fetching        (tick dropped, no change)
//! Fetching --[result, same gen]--> Idle (Succeeded: snapshot replaced)
//!                                       (Failed: snapshot kept, error set)
//! any --[result, other gen]--> unchanged
//! any --[stop]--> Idle, stopped        (generation += 1)
//! ```
//!
//! The scheduler does not serialize ticks, so the drop rule is what keeps at
//! most one request outstanding. The generation check keeps a late response
//! from a torn-down or superseded attempt out of the state.

mod engine;
mod projection;
mod state;

pub use engine::SyncEngine;
pub use projection::Projection;
pub use state::{ApplyOutcome, AttemptOutcome, SyncState, SyncStatus, TickOutcome};
