//! Field deserializers for stored boards.
//!
//! A present-but-broken field falls back to the same value as a missing one,
//! so one bad field never discards the rest of the board.

use super::enums::TaskStatus;
use super::task::TaskId;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Option::<Value>::deserialize(deserializer)
}

/// `YYYY-MM-DD`; anything else loads as absent
pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    Ok(raw(deserializer)?
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

/// Missing, null or unrecognised statuses load as `todo`
pub fn status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskStatus, D::Error> {
    Ok(raw(deserializer)?
        .as_ref()
        .and_then(Value::as_str)
        .and_then(TaskStatus::from_tag)
        .unwrap_or_default())
}

/// Non-string text loads as empty
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(raw(deserializer)?
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default())
}

/// Unusable ids load as the default id; duplicates are re-issued after load
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskId, D::Error> {
    match raw(deserializer)? {
        None | Some(Value::Null) => Ok(TaskId::default()),
        Some(value) => Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("Replacing unusable task id: {}", e);
            TaskId::default()
        })),
    }
}

/// Non-negative counters; floats are truncated, anything else is 0
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = raw(deserializer)?;
    let count = value.as_ref().and_then(|v| {
        v.as_u64().or_else(|| {
            v.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        })
    });
    Ok(count.map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX)))
}

/// Null or non-array loads as empty; entries that fail to parse are dropped
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(Value::Array(items)) = raw(deserializer)? else {
        return Ok(Vec::new());
    };

    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("Dropping unreadable stored entry: {}", e);
                None
            }
        })
        .collect();
    if parsed.len() < total {
        log::debug!("Kept {} of {} stored entries", parsed.len(), total);
    }
    Ok(parsed)
}
