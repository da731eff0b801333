//! # marketpulse
//!
//! Client for a market-state backend: polls a precomputed snapshot (price
//! history, long-range regression curve, sentiment, advisory signal) and
//! shapes it into render-ready series and cards.
//!
//! ## Modules
//!
//! - [`snapshot`]: typed model of the backend's `/state` document
//! - [`source`]: snapshot sources (HTTP client, trait seam for tests)
//! - [`poller`]: fixed-interval polling with a cancellable handle
//! - [`series`]: pure normalization of price series and the long-term curve
//! - [`view`]: dashboard view model derived from the polling state
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marketpulse::{Config, HttpSnapshotSource, Poller, Screen};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let source = Arc::new(HttpSnapshotSource::new(config.backend.clone())?);
//!
//!     let poller = Poller::from_config(source, &config.polling);
//!     let handle = poller.start(
//!         |snapshot| println!("{} hourly candles", snapshot.candles_1h.len()),
//!         |err| eprintln!("backend offline: {}", err),
//!     );
//!
//!     let mut states = handle.subscribe();
//!     while states.changed().await.is_ok() {
//!         print!("{}", Screen::from_state(&states.borrow_and_update()));
//!     }
//!
//!     handle.stop();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod format;
pub mod logging;
pub mod poller;
pub mod series;
pub mod snapshot;
pub mod source;
pub mod view;

pub use config::{BackendConfig, Config, ConfigError, LoggingConfig, PollingConfig};

pub use snapshot::{Advice, LatestSentiment, LongCurve, RawPricePoint, RawValue, Sentiment, Signal, Snapshot};

pub use source::{HttpSnapshotSource, SnapshotSource, SourceError, SourceResult};

pub use poller::{DataState, PollHandle, Poller};

pub use series::{
    normalize_hourly, normalize_intraday, zip_long_curve, CurvePoint, PriceDomain, PricePoint,
    PriceSeries, SeriesKind,
};

pub use view::{AdvisorCard, ChartPanel, Dashboard, NewsStat, Screen, SentimentGauge};
