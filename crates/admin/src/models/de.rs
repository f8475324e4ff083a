//! Lenient field deserializers.
//!
//! The REST API is loosely typed: flags arrive as `1`, `"1"` or `true`,
//! quantities as numbers or numeric strings, and amounts with or without a
//! currency sign. These helpers accept every observed spelling and degrade to
//! `None`/`false` rather than rejecting a whole list over one odd record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use storedesk_core::Money;

/// Interpret a JSON value as a boolean flag.
#[must_use]
pub fn value_as_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        _ => false,
    }
}

/// Interpret a JSON value as an integer.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Interpret a JSON value as display text.
#[must_use]
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `1` / `"1"` / `true` → `true`; anything else (including absence) → `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_flag(&value))
}

/// Number or numeric string → `Some(i64)`; anything else → `None`.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_i64(&value))
}

/// Number or numeric string → id; anything else is an error.
pub fn id<'de, D, I>(deserializer: D) -> Result<I, D::Error>
where
    D: Deserializer<'de>,
    I: From<i64>,
{
    let value = Value::deserialize(deserializer)?;
    value_as_i64(&value)
        .map(I::from)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {value}")))
}

/// Like [`id`], but absent or unreadable ids become `None`.
pub fn opt_id<'de, D, I>(deserializer: D) -> Result<Option<I>, D::Error>
where
    D: Deserializer<'de>,
    I: From<i64>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_i64(&value).map(I::from))
}

/// Number or string amount → `Some(Money)`; anything else → `None`.
pub fn opt_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Money::from_json(&value))
}

/// String or number → `Some(String)`; empty strings and other shapes → `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_text(&value))
}

/// Parse the timestamp formats the API emits.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (assumed UTC) and bare dates.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Render an optional timestamp as a short date, or `-`.
#[must_use]
pub fn display_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map_or_else(|| "-".to_string(), |dt| dt.format("%d %b %Y").to_string())
}

/// Render an optional timestamp as date and time, or `-`.
#[must_use]
pub fn display_datetime(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp).map_or_else(
        || "-".to_string(),
        |dt| dt.format("%d %b %Y, %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flag_spellings() {
        assert!(value_as_flag(&json!(1)));
        assert!(value_as_flag(&json!("1")));
        assert!(value_as_flag(&json!(true)));
        assert!(!value_as_flag(&json!(0)));
        assert!(!value_as_flag(&json!(null)));
        assert!(!value_as_flag(&json!("superadmin")));
    }

    #[test]
    fn test_i64_spellings() {
        assert_eq!(value_as_i64(&json!(100)), Some(100));
        assert_eq!(value_as_i64(&json!("100")), Some(100));
        assert_eq!(value_as_i64(&json!(3.0)), Some(3));
        assert_eq!(value_as_i64(&json!(3.5)), None);
        assert_eq!(value_as_i64(&json!("lots")), None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-15T10:30:00.000000Z").is_some());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_some());
        assert!(parse_timestamp("2024-01-15").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_display_date_falls_back_to_dash() {
        assert_eq!(display_date(None), "-");
        assert_eq!(display_date(Some("2024-01-15")), "15 Jan 2024");
    }
}
