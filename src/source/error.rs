//! Snapshot source error types

use thiserror::Error;

/// Errors that can occur while fetching a snapshot
#[derive(Error, Debug)]
pub enum SourceError {
    /// Connection refused or host unreachable
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not a valid snapshot document
    #[error("Invalid snapshot: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// HTTP client could not be constructed
    #[error("Client setup failed: {0}")]
    Client(String),
}

impl SourceError {
    /// Classify a transport error the way the poller reports it
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_connect() {
            SourceError::Unavailable
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Request(err)
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}

/// Result type alias for snapshot fetches
pub type SourceResult<T> = Result<T, SourceError>;
