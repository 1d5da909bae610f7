//! Column decoding helpers shared by the storage and handler layers.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

/// Parse a JSON-encoded array column.
///
/// Malformed or non-array content yields an empty list; a bad cell never
/// fails the request that reads it.
pub fn parse_json_list<T: DeserializeOwned>(raw: Option<&str>) -> Vec<T> {
    match raw.map(str::trim) {
        None | Some("") => Vec::new(),
        Some(text) => serde_json::from_str(text).unwrap_or_default(),
    }
}

/// Encode a list for a JSON array column.
pub fn to_json_list<T: serde::Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Split a comma-separated text column into trimmed, non-empty entries,
/// preserving order.
pub fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|text| {
        text.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Join entries into a comma-separated text column.
pub fn join_csv(items: &[String]) -> String {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests;
