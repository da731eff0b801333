//! Raw value parsing
//!
//! Turns the loosely typed `timestamp` / `close` fields into numbers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::snapshot::RawValue;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a raw timestamp into Unix milliseconds
///
/// Numbers are taken as milliseconds. Strings may be RFC 3339, naive
/// ISO-8601 (read as UTC), a bare date, or a millisecond count.
pub fn parse_timestamp(raw: &RawValue) -> Option<i64> {
    match raw {
        RawValue::Number(n) if n.is_finite() => Some(*n as i64),
        RawValue::Number(_) => None,
        RawValue::Text(s) => parse_timestamp_str(s.trim()),
        RawValue::Other(_) => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }

    s.parse::<i64>().ok()
}

/// Parse a raw close into a price
///
/// Anything unparseable becomes NaN, which every price filter rejects.
pub fn parse_price(raw: Option<&RawValue>) -> f64 {
    match raw {
        Some(RawValue::Number(n)) => *n,
        Some(RawValue::Text(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Some(RawValue::Other(_)) | None => f64::NAN,
    }
}
