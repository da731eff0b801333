//! Snapshot Sources
//!
//! Where snapshots come from. The poller is generic over [`SnapshotSource`],
//! the production implementation is [`HttpSnapshotSource`].

mod client;
mod error;

pub use client::HttpSnapshotSource;
pub use error::{SourceError, SourceResult};

use async_trait::async_trait;
use std::sync::Arc;

use crate::snapshot::Snapshot;

/// Anything that can produce the current snapshot
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch one fresh snapshot
    async fn fetch(&self) -> SourceResult<Snapshot>;
}

#[async_trait]
impl<S: SnapshotSource + ?Sized> SnapshotSource for Arc<S> {
    async fn fetch(&self) -> SourceResult<Snapshot> {
        (**self).fetch().await
    }
}
