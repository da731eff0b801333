//! Exposed polling state

use std::sync::Arc;

use crate::snapshot::Snapshot;
use crate::source::SourceError;

/// Latest known outcome of the polling loop
///
/// The most recent fetch always wins: a success after a failure moves back
/// to `Ready`, a failure after a success moves to `Failed`.
#[derive(Debug, Clone)]
pub enum DataState {
    /// No fetch has completed yet
    Loading,
    Ready(Arc<Snapshot>),
    Failed(Arc<SourceError>),
}

impl DataState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DataState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DataState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DataState::Failed(_))
    }

    /// Snapshot of the last successful fetch, if that was the latest outcome
    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self {
            DataState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Arc<SourceError>> {
        match self {
            DataState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataState::Loading => write!(f, "loading"),
            DataState::Ready(_) => write!(f, "ready"),
            DataState::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}
