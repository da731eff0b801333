//! Advisor, sentiment and news cards

use serde::Serialize;

use crate::format::usd_fixed;
use crate::snapshot::{Advice, Signal, Snapshot};

/// Fear & Greed value used when the backend sends none
pub const NEUTRAL_FEAR_GREED: f64 = 50.0;

/// Badge tone of the advisor signal
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Buy,
    Sell,
    Hold,
}

impl From<Signal> for Tone {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Buy => Tone::Buy,
            Signal::Sell => Tone::Sell,
            _ => Tone::Hold,
        }
    }
}

/// Advisory card
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdvisorCard {
    pub signal: Signal,
    pub tone: Tone,
    /// `$x.xx`, or `---` when no prediction is available
    pub predicted_price: String,
    pub direction: String,
    pub sentiment_score: f64,
    /// Backend-side advisor failure, shown as a note
    pub error: Option<String>,
}

impl AdvisorCard {
    pub fn from_advice(advice: &Advice) -> Self {
        let predicted_price = match advice.predicted_price {
            Some(p) if p != 0.0 && p.is_finite() => usd_fixed(p),
            _ => "---".to_string(),
        };
        let direction = advice
            .direction
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("Neutral")
            .to_string();

        Self {
            signal: advice.signal,
            tone: Tone::from(advice.signal),
            predicted_price,
            direction,
            sentiment_score: advice.sentiment_score.unwrap_or(0.0),
            error: advice.error.clone(),
        }
    }
}

/// Fear & Greed zone, by clamped value
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GaugeZone {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
}

impl GaugeZone {
    pub fn for_value(value: f64) -> Self {
        if value <= 25.0 {
            GaugeZone::ExtremeFear
        } else if value <= 45.0 {
            GaugeZone::Fear
        } else if value <= 55.0 {
            GaugeZone::Neutral
        } else {
            GaugeZone::Greed
        }
    }
}

impl std::fmt::Display for GaugeZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GaugeZone::ExtremeFear => write!(f, "Extreme Fear"),
            GaugeZone::Fear => write!(f, "Fear"),
            GaugeZone::Neutral => write!(f, "Neutral"),
            GaugeZone::Greed => write!(f, "Greed"),
        }
    }
}

/// Fear & Greed gauge
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SentimentGauge {
    /// Value as reported
    pub value: f64,
    /// Bar fill, clamped to 0..=100
    pub fill_percent: f64,
    pub zone: GaugeZone,
}

impl SentimentGauge {
    pub fn new(value: f64) -> Self {
        let fill_percent = if value.is_nan() {
            NEUTRAL_FEAR_GREED
        } else {
            value.clamp(0.0, 100.0)
        };
        Self {
            value,
            fill_percent,
            zone: GaugeZone::for_value(fill_percent),
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(snapshot.fear_greed().unwrap_or(NEUTRAL_FEAR_GREED))
    }
}

/// Arrow shown next to a stat
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// News sentiment stat
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewsStat {
    pub value: f64,
    /// Two decimals
    pub display: String,
    /// "Bullish" / "Bearish"
    pub mood: &'static str,
    pub trend: Trend,
}

impl NewsStat {
    pub fn new(value: f64) -> Self {
        let bullish = value > 0.0;
        Self {
            value,
            display: format!("{:.2}", value),
            mood: if bullish { "Bullish" } else { "Bearish" },
            trend: if bullish { Trend::Up } else { Trend::Down },
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(snapshot.news_sentiment().unwrap_or(0.0))
    }
}
