//! Chart panels

use serde::Serialize;

use crate::series::{PriceDomain, PriceSeries};

/// A price chart, or the placeholder shown while there is nothing to plot
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChartPanel {
    Plot {
        series: PriceSeries,
        domain: PriceDomain,
    },
    /// Normalized series is empty; no chart frame is built
    Waiting,
}

impl ChartPanel {
    pub fn from_series(series: PriceSeries) -> Self {
        match series.domain() {
            Some(domain) => ChartPanel::Plot { series, domain },
            None => ChartPanel::Waiting,
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self, ChartPanel::Waiting)
    }

    pub fn series(&self) -> Option<&PriceSeries> {
        match self {
            ChartPanel::Plot { series, .. } => Some(series),
            ChartPanel::Waiting => None,
        }
    }
}
