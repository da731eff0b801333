//! Snapshot data model
//!
//! Typed mirror of the backend's `/state` document. Every field is optional
//! on the wire: missing arrays decode as empty, missing objects as `None`.
//! A field of the wrong JSON type decodes as if it were missing, so one bad
//! entry never costs the rest of the document.
//! A snapshot is always replaced wholesale on the next poll, never merged.
//!
//! - `Snapshot`: the full response
//! - `Advice` / `Signal`: the advisory card
//! - `LongCurve`: parallel arrays of the long-range regression curve
//! - `RawPricePoint`: one candle or intraday entry, as sent
//! - `Sentiment` / `LatestSentiment`: sentiment series and current values

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One full backend response describing the current market state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient_object")]
    pub advice: Option<Advice>,

    #[serde(default, deserialize_with = "lenient_object")]
    pub long_curve: Option<LongCurve>,

    #[serde(default, deserialize_with = "lenient_entries")]
    pub candles_1h: Vec<RawPricePoint>,

    #[serde(default, deserialize_with = "lenient_entries")]
    pub intraday_1m: Vec<RawPricePoint>,

    #[serde(default, deserialize_with = "lenient_object")]
    pub sentiment: Option<Sentiment>,
}

impl Snapshot {
    /// Parse a snapshot from a JSON document
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Latest Fear & Greed reading, if the backend sent one
    pub fn fear_greed(&self) -> Option<f64> {
        self.sentiment
            .as_ref()
            .and_then(|s| s.latest.as_ref())
            .and_then(|l| l.fear_greed)
    }

    /// Latest aggregated news sentiment, if the backend sent one
    pub fn news_sentiment(&self) -> Option<f64> {
        self.sentiment
            .as_ref()
            .and_then(|s| s.latest.as_ref())
            .and_then(|l| l.news_sentiment)
    }
}

/// Advisory signal emitted by the backend model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    /// Advice generation failed on the backend
    Error,
    #[serde(other)]
    Unknown,
}

impl Default for Signal {
    fn default() -> Self {
        Signal::Hold
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
            Signal::Error => write!(f, "ERROR"),
            Signal::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Advisory block of the snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Advice {
    /// `null` reads as `HOLD`, any other non-string as `UNKNOWN`
    #[serde(default, deserialize_with = "lenient_signal")]
    pub signal: Signal,
    /// Predicted next close
    #[serde(default, deserialize_with = "lenient_number")]
    pub predicted_price: Option<f64>,
    /// "Bullish" / "Bearish" / "Neutral"
    #[serde(default, deserialize_with = "lenient_text")]
    pub direction: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sentiment_score: Option<f64>,
    /// Set by the backend when the advisor itself failed
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
}

/// Long-range regression curve as four parallel arrays
///
/// Index `i` across `labels`, `pred_price`, `pred_price_low` and
/// `pred_price_high` describes one period. Lengths are not validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LongCurve {
    #[serde(default, deserialize_with = "lenient_labels")]
    pub labels: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub pred_price: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub pred_price_low: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub pred_price_high: Vec<Option<f64>>,
}

/// A JSON value that may arrive either as a number or as a string
///
/// Anything else (`true`, objects, arrays) lands in `Other` and is treated
/// as unparseable downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(Value),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// One raw candle or intraday entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawPricePoint {
    #[serde(default)]
    pub timestamp: Option<RawValue>,
    #[serde(default)]
    pub close: Option<RawValue>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub open: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub high: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub low: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume: Option<f64>,
}

impl RawPricePoint {
    /// Create an entry from a timestamp and a close
    pub fn new(timestamp: impl Into<RawValue>, close: impl Into<RawValue>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            close: Some(close.into()),
            ..Default::default()
        }
    }

    /// Builder method: attach a volume
    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Sentiment block: short history plus the latest values
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Sentiment {
    #[serde(default, deserialize_with = "lenient_texts")]
    pub timestamps: Vec<Option<String>>,
    /// Aligned with `timestamps`; unreadable readings are `None`
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub news_sentiment: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub fear_greed: Vec<Option<f64>>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub latest: Option<LatestSentiment>,
}

/// Current sentiment readings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LatestSentiment {
    /// Fear & Greed index, 0-100
    #[serde(default, deserialize_with = "lenient_number")]
    pub fear_greed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub news_sentiment: Option<f64>,
}

// Field-level decoders. Each one reads a plain `Value` first, so a wrong
// type only ever empties that one field.

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn array_from(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(number_from))
}

fn lenient_numbers<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Option<f64>>, D::Error> {
    let items = array_from(Option::<Value>::deserialize(deserializer)?);
    Ok(items.iter().map(number_from).collect())
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_texts<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Option<String>>, D::Error> {
    let items = array_from(Option::<Value>::deserialize(deserializer)?);
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Curve labels; numbers are kept as their text, other junk becomes empty
fn lenient_labels<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    _ => String::new(),
                })
                .collect(),
        )),
        _ => Ok(None),
    }
}

fn lenient_signal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Signal, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Signal::Hold),
        Some(value @ Value::String(_)) => {
            Ok(serde_json::from_value(value).unwrap_or(Signal::Unknown))
        }
        Some(_) => Ok(Signal::Unknown),
    }
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}

/// Entries that are not objects are dropped; the rest decode field by field
fn lenient_entries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<RawPricePoint>, D::Error> {
    let items = array_from(Option::<Value>::deserialize(deserializer)?);
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "advice": {
            "signal": "BUY",
            "predicted_price": 64250.5,
            "direction": "Bullish",
            "sentiment_score": 0.12
        },
        "long_curve": {
            "labels": ["2024", "2025"],
            "pred_price": [60000, 90000],
            "pred_price_low": [50000, 80000],
            "pred_price_high": [70000, 100000]
        },
        "candles_1h": [
            {"timestamp": "2024-05-01T10:00:00", "open": 63000.0, "high": 63500.0,
             "low": 62900.0, "close": 63400.0, "volume": 12.5}
        ],
        "intraday_1m": [
            {"timestamp": "2024-05-01T10:01:00", "close": "63410.2", "volume": 0.4}
        ],
        "sentiment": {
            "timestamps": ["2024-05-01T00:00:00"],
            "news_sentiment": [0.12],
            "fear_greed": [71],
            "latest": {"news_sentiment": 0.12, "fear_greed": 71}
        }
    }"#;

    #[test]
    fn test_parse_full_snapshot() {
        let snapshot = Snapshot::from_json(SAMPLE).unwrap();

        let advice = snapshot.advice.as_ref().unwrap();
        assert_eq!(advice.signal, Signal::Buy);
        assert_eq!(advice.predicted_price, Some(64250.5));
        assert_eq!(advice.direction.as_deref(), Some("Bullish"));

        let curve = snapshot.long_curve.as_ref().unwrap();
        assert_eq!(curve.labels.as_ref().unwrap().len(), 2);
        assert_eq!(curve.pred_price_high[1], Some(100000.0));

        assert_eq!(snapshot.candles_1h.len(), 1);
        assert_eq!(snapshot.candles_1h[0].close, Some(RawValue::Number(63400.0)));
        assert_eq!(snapshot.candles_1h[0].volume, Some(12.5));
        assert_eq!(
            snapshot.intraday_1m[0].close,
            Some(RawValue::Text("63410.2".to_string()))
        );

        assert_eq!(snapshot.fear_greed(), Some(71.0));
        assert_eq!(snapshot.news_sentiment(), Some(0.12));
    }

    #[test]
    fn test_parse_empty_document() {
        let snapshot = Snapshot::from_json("{}").unwrap();
        assert!(snapshot.advice.is_none());
        assert!(snapshot.long_curve.is_none());
        assert!(snapshot.candles_1h.is_empty());
        assert!(snapshot.intraday_1m.is_empty());
        assert_eq!(snapshot.fear_greed(), None);
    }

    #[test]
    fn test_null_arrays_decode_as_empty() {
        let snapshot =
            Snapshot::from_json(r#"{"candles_1h": null, "intraday_1m": null}"#).unwrap();
        assert!(snapshot.candles_1h.is_empty());
        assert!(snapshot.intraday_1m.is_empty());
    }

    #[test]
    fn test_error_advice_and_unknown_signal() {
        let snapshot = Snapshot::from_json(
            r#"{"advice": {"signal": "ERROR", "error": "model missing",
                           "predicted_price": null, "direction": "Neutral",
                           "sentiment_score": 0}}"#,
        )
        .unwrap();
        let advice = snapshot.advice.unwrap();
        assert_eq!(advice.signal, Signal::Error);
        assert_eq!(advice.error.as_deref(), Some("model missing"));
        assert_eq!(advice.predicted_price, None);

        let advice: Advice = serde_json::from_str(r#"{"signal": "STRONG_BUY"}"#).unwrap();
        assert_eq!(advice.signal, Signal::Unknown);
    }

    #[test]
    fn test_curve_with_null_values() {
        let curve: LongCurve = serde_json::from_str(
            r#"{"labels": ["2030"], "pred_price": [null], "pred_price_low": [1.0]}"#,
        )
        .unwrap();
        assert_eq!(curve.pred_price, vec![None]);
        assert_eq!(curve.pred_price_low, vec![Some(1.0)]);
        assert!(curve.pred_price_high.is_empty());
    }

    #[test]
    fn test_missing_point_fields() {
        let point: RawPricePoint = serde_json::from_str(r#"{"timestamp": 1000}"#).unwrap();
        assert_eq!(point.timestamp, Some(RawValue::Number(1000.0)));
        assert!(point.close.is_none());
    }

    #[test]
    fn test_bad_entry_fields_only_affect_that_entry() {
        let snapshot = Snapshot::from_json(
            r#"{"candles_1h": [
                {"timestamp": 1000, "close": 20000, "volume": "12.5"},
                {"timestamp": 2000, "close": true, "open": {}},
                {"timestamp": [3], "close": 20100},
                "not-an-entry",
                null,
                {"timestamp": 4000, "close": "20200", "high": "n/a"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.candles_1h.len(), 4);
        assert_eq!(snapshot.candles_1h[0].volume, Some(12.5));
        assert_eq!(
            snapshot.candles_1h[1].close,
            Some(RawValue::Other(Value::Bool(true)))
        );
        assert_eq!(snapshot.candles_1h[1].open, None);
        assert_eq!(snapshot.candles_1h[3].high, None);
    }

    #[test]
    fn test_bad_advice_fields() {
        let advice: Advice = serde_json::from_str(
            r#"{"signal": null, "predicted_price": "64250.5", "direction": 3,
                "sentiment_score": "high"}"#,
        )
        .unwrap();
        assert_eq!(advice.signal, Signal::Hold);
        assert_eq!(advice.predicted_price, Some(64250.5));
        assert_eq!(advice.direction, None);
        assert_eq!(advice.sentiment_score, None);

        let advice: Advice = serde_json::from_str(r#"{"signal": 1}"#).unwrap();
        assert_eq!(advice.signal, Signal::Unknown);
    }

    #[test]
    fn test_bad_sentiment_values_keep_alignment() {
        let snapshot = Snapshot::from_json(
            r#"{"sentiment": {
                "timestamps": ["2024-05-01T00:00:00", 17],
                "fear_greed": [71, "n/a"],
                "news_sentiment": "oops",
                "latest": {"fear_greed": "71", "news_sentiment": false}
            }}"#,
        )
        .unwrap();
        let sentiment = snapshot.sentiment.as_ref().unwrap();
        assert_eq!(sentiment.timestamps, vec![Some("2024-05-01T00:00:00".to_string()), None]);
        assert_eq!(sentiment.fear_greed, vec![Some(71.0), None]);
        assert!(sentiment.news_sentiment.is_empty());
        assert_eq!(snapshot.fear_greed(), Some(71.0));
        assert_eq!(snapshot.news_sentiment(), None);
    }

    #[test]
    fn test_wrong_block_types_decode_as_missing() {
        let snapshot = Snapshot::from_json(
            r#"{"advice": "BUY", "long_curve": [1, 2], "sentiment": 5,
                "candles_1h": {"timestamp": 1}, "intraday_1m": "none"}"#,
        )
        .unwrap();
        assert!(snapshot.advice.is_none());
        assert!(snapshot.long_curve.is_none());
        assert!(snapshot.sentiment.is_none());
        assert!(snapshot.candles_1h.is_empty());
        assert!(snapshot.intraday_1m.is_empty());

        let curve: LongCurve =
            serde_json::from_str(r#"{"labels": ["2030", 2031, null], "pred_price": [1, "x"]}"#)
                .unwrap();
        assert_eq!(
            curve.labels,
            Some(vec!["2030".to_string(), "2031".to_string(), String::new()])
        );
        assert_eq!(curve.pred_price, vec![Some(1.0), None]);
    }

    #[test]
    fn test_signal_display() {
        assert_eq!(Signal::Buy.to_string(), "BUY");
        assert_eq!(Signal::default(), Signal::Hold);
    }
}
