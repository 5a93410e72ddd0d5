//! Helpers for pulling tables out of provider JSON payloads.

use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::{records_from_values, ProviderId, Record, Rows};

/// Extracts a table from `payload`.
///
/// Accepts a bare array, or an object holding the array under the first of
/// `keys` that is present (falling back to `data`). A `null` payload or a
/// `null` table is an empty table.
pub fn extract_rows(
    payload: Value,
    provider: ProviderId,
    keys: &[&str],
) -> Result<Rows, MarketDataError> {
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(records_from_values(items)),
        Value::Object(mut map) => {
            for key in keys.iter().copied().chain(std::iter::once("data")) {
                match map.remove(key) {
                    Some(Value::Array(items)) => return Ok(records_from_values(items)),
                    Some(Value::Null) => return Ok(Vec::new()),
                    Some(other) => {
                        return Err(parse_error(
                            provider,
                            format!("'{}' is not a list (got {})", key, kind_of(&other)),
                        ))
                    }
                    None => continue,
                }
            }
            Err(parse_error(
                provider,
                format!("no table found under any of {:?}", keys),
            ))
        }
        other => Err(parse_error(
            provider,
            format!("expected a table, got {}", kind_of(&other)),
        )),
    }
}

/// Extracts a single object from `payload`. A one-element array is unwrapped.
pub fn extract_record(payload: Value, provider: ProviderId) -> Result<Record, MarketDataError> {
    match payload {
        Value::Object(map) => Ok(map),
        Value::Array(mut items) if !items.is_empty() => match items.swap_remove(0) {
            Value::Object(map) => Ok(map),
            other => Err(parse_error(
                provider,
                format!("expected an object, got {}", kind_of(&other)),
            )),
        },
        other => Err(parse_error(
            provider,
            format!("expected an object, got {}", kind_of(&other)),
        )),
    }
}

/// Shallow overlay: keys of `over` replace keys of `base`.
pub fn overlay(mut base: Record, over: Record) -> Record {
    for (key, value) in over {
        base.insert(key, value);
    }
    base
}

/// Walks `path` through nested objects.
pub fn pointer<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

fn parse_error(provider: ProviderId, message: String) -> MarketDataError {
    MarketDataError::ParseError {
        provider: provider.as_str().to_string(),
        message,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
