//! Backend HTTP client
//!
//! Fetches the snapshot document from `GET {base_url}/state`.

use async_trait::async_trait;
use reqwest::Client;

use super::error::{SourceError, SourceResult};
use super::SnapshotSource;
use crate::config::BackendConfig;
use crate::snapshot::Snapshot;

/// Snapshot source backed by the REST endpoint
pub struct HttpSnapshotSource {
    client: Client,
    config: BackendConfig,
}

impl HttpSnapshotSource {
    /// Create a new client with the given configuration
    pub fn new(config: BackendConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Full URL of the snapshot endpoint
    pub fn state_url(&self) -> String {
        format!("{}/state", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch(&self) -> SourceResult<Snapshot> {
        let url = self.state_url();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(SourceError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(SourceError::from_transport)?;
        let snapshot = Snapshot::from_json(&body)?;

        tracing::debug!(
            url = %url,
            candles = snapshot.candles_1h.len(),
            intraday = snapshot.intraday_1m.len(),
            "Fetched snapshot"
        );

        Ok(snapshot)
    }
}
