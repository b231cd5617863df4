// src/domain/fields.rs

//! Leaf readers used when normalizing loosely-shaped JSON into domain records.
//!
//! Every reader treats `null`, `false`, `0`, `""` and a missing key the same
//! way: the leaf falls back to its default. Wrong types are coerced where a
//! sensible reading exists and defaulted otherwise; nothing here rejects input.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

static NULL: Value = Value::Null;

/// Nested object under `key`, or `null` so that leaf reads fall through to defaults.
pub fn nested<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(&NULL)
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn present<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_truthy(v))
}

pub fn text(value: &Value, key: &str) -> String {
    match present(value, key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub fn number(value: &Value, key: &str) -> f64 {
    match present(value, key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Non-negative whole count; fractional input is truncated.
pub fn count(value: &Value, key: &str) -> u32 {
    let n = number(value, key);
    if n.is_finite() && n > 0.0 {
        n as u32
    } else {
        0
    }
}

pub fn flag(value: &Value, key: &str) -> bool {
    present(value, key).is_some()
}

pub fn texts(value: &Value, key: &str) -> Vec<String> {
    match present(value, key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Sunday-first occupancy pattern. Short arrays are padded with `false`,
/// long ones truncated to seven days.
pub fn schedule(value: &Value, key: &str) -> [bool; 7] {
    let mut days = [false; 7];
    if let Some(Value::Array(items)) = present(value, key) {
        for (slot, item) in days.iter_mut().zip(items) {
            *slot = is_truthy(item);
        }
    }
    days
}

pub fn timestamp(value: &Value, key: &str, fallback: DateTime<Utc>) -> DateTime<Utc> {
    match present(value, key) {
        None => fallback,
        Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
            tracing::warn!(field = key, value = %raw, "unparseable timestamp, using default");
            fallback
        }),
    }
}

pub fn date(value: &Value, key: &str) -> Option<NaiveDate> {
    let raw = present(value, key)?;
    let parsed = parse_timestamp(raw).map(|dt| dt.date_naive());
    if parsed.is_none() {
        tracing::warn!(field = key, value = %raw, "unparseable date, leaving unset");
    }
    parsed
}

fn parse_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
