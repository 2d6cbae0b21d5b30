//! Shared parsing for operator input.

use anyhow::{Context, bail};
use chrono::NaiveDateTime;
use ct_core::{HourlyRate, TIMESTAMP_FORMAT};

/// Layouts accepted for timestamps, tried in order.
const TIMESTAMP_LAYOUTS: [&str; 3] = [TIMESTAMP_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parse a local wall-clock timestamp.
///
/// Supports:
/// - "2024-01-01 09:00:00" (the documented layout)
/// - "2024-01-01T09:00:00"
/// - "2024-01-01 09:00" (seconds default to zero)
pub fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
        .with_context(|| format!("invalid timestamp {s:?}, expected yyyy-MM-dd HH:mm:ss"))
}

/// Parse a number of hours. Range checks are left to the timer.
pub fn parse_hours(s: &str) -> anyhow::Result<f64> {
    let hours: f64 = s
        .trim()
        .parse()
        .with_context(|| format!("invalid number of hours {s:?}"))?;
    if !hours.is_finite() {
        bail!("invalid number of hours {s:?}");
    }
    Ok(hours)
}

/// Parse a cost per hour.
pub fn parse_rate(s: &str) -> anyhow::Result<HourlyRate> {
    let value: f64 = s
        .trim()
        .parse()
        .with_context(|| format!("invalid rate {s:?}, expected a number"))?;
    Ok(HourlyRate::new(value)?)
}

/// Require a non-blank name.
pub fn parse_name(s: &str) -> anyhow::Result<String> {
    let name = s.trim();
    if name.is_empty() {
        bail!("name cannot be empty");
    }
    Ok(name.to_string())
}
