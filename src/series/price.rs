//! Price series normalization
//!
//! Turns raw candle / intraday entries into a plot-ready series:
//! parse, filter by price bounds, deduplicate by timestamp (last entry wins),
//! sort ascending, then derive a padded y-axis domain.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::timestamp::{parse_price, parse_timestamp};
use crate::format::time_label;
use crate::snapshot::RawPricePoint;

/// Which chart a series feeds; decides the price filter and domain padding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// 1h closes; sanity bounds against bad ticks
    Hourly,
    /// 1m closes; only non-positive prices are rejected
    Intraday,
}

impl SeriesKind {
    /// Whether a parsed price survives the filter (NaN and infinities never do)
    pub fn accepts(&self, price: f64) -> bool {
        if !price.is_finite() {
            return false;
        }
        match self {
            SeriesKind::Hourly => price > 1000.0 && price < 500_000.0,
            SeriesKind::Intraday => price > 0.0,
        }
    }

    /// Relative padding applied to both ends of the domain
    pub fn padding(&self) -> f64 {
        match self {
            SeriesKind::Hourly => 0.005,
            SeriesKind::Intraday => 0.0005,
        }
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::Hourly => write!(f, "hourly"),
            SeriesKind::Intraday => write!(f, "intraday"),
        }
    }
}

/// One normalized point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// `HH:MM` axis label
    pub label: String,
    pub price: f64,
}

/// Padded y-axis bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceDomain {
    pub lower: f64,
    pub upper: f64,
}

/// Deduplicated, filtered, ascending series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSeries {
    kind: SeriesKind,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Normalize raw entries for the given chart
    pub fn normalize(kind: SeriesKind, raw: &[RawPricePoint]) -> Self {
        let mut by_timestamp: BTreeMap<i64, PricePoint> = BTreeMap::new();
        let mut dropped = 0usize;

        for entry in raw {
            let Some(timestamp) = entry.timestamp.as_ref().and_then(parse_timestamp) else {
                dropped += 1;
                continue;
            };
            let price = parse_price(entry.close.as_ref());
            if !kind.accepts(price) {
                dropped += 1;
                continue;
            }

            // later entries overwrite earlier ones at the same timestamp
            by_timestamp.insert(
                timestamp,
                PricePoint {
                    timestamp,
                    label: time_label(timestamp),
                    price,
                },
            );
        }

        if dropped > 0 {
            tracing::debug!(
                series = %kind,
                dropped,
                kept = by_timestamp.len(),
                "Dropped malformed or out-of-range points"
            );
        }

        Self {
            kind,
            points: by_timestamp.into_values().collect(),
        }
    }

    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent point
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Padded display domain; `None` for an empty series
    pub fn domain(&self) -> Option<PriceDomain> {
        if self.points.is_empty() {
            return None;
        }

        let (min, max) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.price), hi.max(p.price))
            });
        let pad = self.kind.padding();

        Some(PriceDomain {
            lower: min - min * pad,
            upper: max + max * pad,
        })
    }

    /// Convert back into raw entries (numeric timestamp and close)
    pub fn to_raw(&self) -> Vec<RawPricePoint> {
        self.points
            .iter()
            .map(|p| RawPricePoint::new(p.timestamp, p.price))
            .collect()
    }
}

/// Normalize the 1h candle closes
pub fn normalize_hourly(raw: &[RawPricePoint]) -> PriceSeries {
    PriceSeries::normalize(SeriesKind::Hourly, raw)
}

/// Normalize the 1m intraday closes
pub fn normalize_intraday(raw: &[RawPricePoint]) -> PriceSeries {
    PriceSeries::normalize(SeriesKind::Intraday, raw)
}
