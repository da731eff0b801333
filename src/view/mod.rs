//! View Model
//!
//! The render boundary: everything a presentation layer needs, derived
//! purely from the current [`DataState`]. Presentation itself only has to
//! draw these values; the `Display` impls give a plain terminal rendering.

mod cards;
mod chart;

pub use cards::{
    AdvisorCard, GaugeZone, NewsStat, SentimentGauge, Tone, Trend, NEUTRAL_FEAR_GREED,
};
pub use chart::ChartPanel;

use serde::Serialize;
use std::fmt;

use crate::format::{time_label, usd_whole};
use crate::poller::DataState;
use crate::series::{normalize_hourly, normalize_intraday, zip_long_curve, CurvePoint};
use crate::snapshot::Snapshot;

pub const CONNECTING_TEXT: &str = "Connecting to Neural Network...";
pub const OFFLINE_TEXT: &str = "Error: Backend Offline";
pub const WAITING_TEXT: &str = "Waiting for data...";

/// Top-level screen for a polling state
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    Connecting,
    /// Fetch failed; the detail is kept for logs, the screen stays generic
    Offline { detail: String },
    Live(Box<Dashboard>),
}

impl Screen {
    pub fn from_state(state: &DataState) -> Self {
        match state {
            DataState::Loading => Screen::Connecting,
            DataState::Failed(err) => Screen::Offline {
                detail: err.to_string(),
            },
            DataState::Ready(snapshot) => Screen::Live(Box::new(Dashboard::from_snapshot(snapshot))),
        }
    }
}

/// Everything shown for one snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub advisor: Option<AdvisorCard>,
    pub sentiment: SentimentGauge,
    pub news: NewsStat,
    pub long_term: Vec<CurvePoint>,
    pub hourly: ChartPanel,
    pub intraday: ChartPanel,
}

impl Dashboard {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            advisor: snapshot.advice.as_ref().map(AdvisorCard::from_advice),
            sentiment: SentimentGauge::from_snapshot(snapshot),
            news: NewsStat::from_snapshot(snapshot),
            long_term: zip_long_curve(snapshot.long_curve.as_ref()),
            hourly: ChartPanel::from_series(normalize_hourly(&snapshot.candles_1h)),
            intraday: ChartPanel::from_series(normalize_intraday(&snapshot.intraday_1m)),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Connecting => writeln!(f, "{}", CONNECTING_TEXT),
            Screen::Offline { .. } => writeln!(f, "{}", OFFLINE_TEXT),
            Screen::Live(dashboard) => write!(f, "{}", dashboard),
        }
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.advisor {
            Some(card) => {
                writeln!(f, "AI Advisor  [{}]", card.signal)?;
                writeln!(f, "  Predicted next close: {}", card.predicted_price)?;
                writeln!(
                    f,
                    "  Trend: {}  Sentiment Score: {}",
                    card.direction, card.sentiment_score
                )?;
                if let Some(err) = &card.error {
                    writeln!(f, "  Note: {}", err)?;
                }
            }
            None => writeln!(f, "AI Advisor  (no advice)")?,
        }

        writeln!(
            f,
            "Fear & Greed: {} ({})  News Sentiment: {} {}",
            self.sentiment.value, self.sentiment.zone, self.news.display, self.news.mood
        )?;

        match (self.long_term.first(), self.long_term.last()) {
            (Some(first), Some(last)) => writeln!(
                f,
                "Long-term curve: {} .. {} ({} periods), {} -> {}",
                first.label,
                last.label,
                self.long_term.len(),
                optional_usd(first.price),
                optional_usd(last.price)
            )?,
            _ => writeln!(f, "Long-term curve: {}", WAITING_TEXT)?,
        }

        write_panel(f, "Price (1H Close)", &self.hourly)?;
        write_panel(f, "Intraday (1m)", &self.intraday)
    }
}

fn write_panel(f: &mut fmt::Formatter<'_>, title: &str, panel: &ChartPanel) -> fmt::Result {
    match panel {
        ChartPanel::Plot { series, domain } => {
            let points = series.points();
            // Plot always holds at least one point
            let (first, last) = (&points[0], &points[points.len() - 1]);
            writeln!(
                f,
                "{}: {} points {}-{}, last {} [axis {} .. {}]",
                title,
                points.len(),
                time_label(first.timestamp),
                time_label(last.timestamp),
                usd_whole(last.price),
                usd_whole(domain.lower),
                usd_whole(domain.upper)
            )
        }
        ChartPanel::Waiting => writeln!(f, "{}: {}", title, WAITING_TEXT),
    }
}

fn optional_usd(value: Option<f64>) -> String {
    value.map(usd_whole).unwrap_or_else(|| "---".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Advice, LongCurve, RawPricePoint, Signal};
    use crate::source::SourceError;
    use std::sync::Arc;

    fn snapshot() -> Snapshot {
        Snapshot {
            advice: Some(Advice {
                signal: Signal::Sell,
                predicted_price: Some(20400.0),
                direction: Some("Bearish".into()),
                sentiment_score: Some(-0.2),
                error: None,
            }),
            long_curve: Some(LongCurve {
                labels: Some(vec!["2024".into(), "2025".into()]),
                pred_price: vec![Some(60000.0), Some(90000.0)],
                pred_price_low: vec![Some(50000.0), Some(80000.0)],
                pred_price_high: vec![Some(70000.0), Some(100000.0)],
            }),
            candles_1h: vec![
                RawPricePoint::new("2024-05-01T10:00:00", "20000"),
                RawPricePoint::new("2024-05-01T11:00:00", "21000"),
            ],
            intraday_1m: vec![],
            sentiment: None,
        }
    }

    #[test]
    fn test_screen_per_state() {
        assert_eq!(Screen::from_state(&DataState::Loading), Screen::Connecting);

        let failed = DataState::Failed(Arc::new(SourceError::Timeout));
        assert_eq!(
            Screen::from_state(&failed),
            Screen::Offline {
                detail: "Request timeout".into()
            }
        );

        let ready = DataState::Ready(Arc::new(snapshot()));
        assert!(matches!(Screen::from_state(&ready), Screen::Live(_)));
    }

    #[test]
    fn test_dashboard_from_snapshot() {
        let dashboard = Dashboard::from_snapshot(&snapshot());

        assert_eq!(dashboard.advisor.as_ref().unwrap().tone, Tone::Sell);
        assert_eq!(dashboard.long_term.len(), 2);
        assert_eq!(dashboard.sentiment.zone, GaugeZone::Neutral);
        assert_eq!(dashboard.hourly.series().unwrap().len(), 2);
        // empty intraday array renders a placeholder, not an empty chart
        assert!(dashboard.intraday.is_waiting());
    }

    #[test]
    fn test_dashboard_from_empty_snapshot() {
        let dashboard = Dashboard::from_snapshot(&Snapshot::default());
        assert!(dashboard.advisor.is_none());
        assert!(dashboard.long_term.is_empty());
        assert!(dashboard.hourly.is_waiting());
        assert!(dashboard.intraday.is_waiting());
    }

    #[test]
    fn test_text_rendering() {
        let text = Screen::Live(Box::new(Dashboard::from_snapshot(&snapshot()))).to_string();

        assert!(text.contains("AI Advisor  [SELL]"));
        assert!(text.contains("Predicted next close: $20400.00"));
        assert!(text.contains("Fear & Greed: 50 (Neutral)"));
        assert!(text.contains("Long-term curve: 2024 .. 2025 (2 periods), $60,000 -> $90,000"));
        assert!(text.contains("Price (1H Close): 2 points 10:00-11:00, last $21,000 [axis $19,900 .. $21,105]"));
        assert!(text.contains(&format!("Intraday (1m): {}", WAITING_TEXT)));

        assert_eq!(Screen::Connecting.to_string().trim(), CONNECTING_TEXT);
        let offline = Screen::Offline {
            detail: "Backend unavailable".into(),
        };
        assert_eq!(offline.to_string().trim(), OFFLINE_TEXT);
    }
}
