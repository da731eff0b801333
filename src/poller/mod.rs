//! Polling Data Source
//!
//! Keeps the latest known snapshot by calling a [`SnapshotSource`] on a fixed
//! interval. Each outcome fully replaces the previous state; there is no
//! backoff and no merging between polls.
//!
//! [`SnapshotSource`]: crate::source::SnapshotSource

mod scheduler;
mod state;

pub use scheduler::{PollHandle, Poller};
pub use state::DataState;
