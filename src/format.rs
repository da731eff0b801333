//! Display formatting
//!
//! Currency strings and chart time labels.

use chrono::DateTime;

/// Format as whole US dollars, e.g. `$20,500`
pub fn usd_whole(value: f64) -> String {
    if !value.is_finite() {
        return "$NaN".to_string();
    }
    let sign = if value < 0.0 && value.abs().round() != 0.0 { "-" } else { "" };
    let dollars = value.abs().round() as u64;
    format!("{}${}", sign, group_thousands(dollars))
}

/// Two-decimal dollar amount without grouping, e.g. `$64250.50`
pub fn usd_fixed(value: f64) -> String {
    if !value.is_finite() {
        return "$NaN".to_string();
    }
    format!("${:.2}", value)
}

/// `HH:MM` label for a Unix millisecond timestamp (UTC)
pub fn time_label(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
