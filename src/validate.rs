//!
//! # Shape validation and payload assembly
//!
//! Inbound requests arrive as untyped key/value maps assembled from the
//! query string and the body. Before any record is constructed, the map's
//! key set is checked against the expected field set for the record
//! (`shape_matches`), so unrelated payloads never reach domain code.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Structurally compares the key set of `candidate` against `expected`.
///
/// With `strict` set, the two sets must be exactly equal. Without it,
/// differing cardinalities degrade the comparison to membership of the
/// smaller set in the larger, which lets callers validate a subset of
/// fields (credentials only, say) while still rejecting unrelated payloads.
pub fn shape_matches(candidate: &Map<String, Value>, expected: &[&str], strict: bool) -> bool {
    let keys: Vec<&str> = candidate.keys().map(String::as_str).collect();

    if strict && keys.len() != expected.len() {
        return false;
    }

    if keys.len() <= expected.len() {
        keys.iter().all(|key| expected.contains(key))
    } else {
        expected.iter().all(|key| keys.contains(key))
    }
}

/// Parses a raw query string into an untyped map. Values come out as JSON
/// strings.
pub fn query_map(query: &str) -> Map<String, Value> {
    let pairs: HashMap<String, String> =
        serde_urlencoded::from_str(query).unwrap_or_default();
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Parses body bytes into an untyped map.
///
/// JSON objects are tried first; a urlencoded form is the fallback, which
/// also covers form and multipart submissions whose payload is plain
/// key/value text. Anything else yields an empty map and is caught later
/// by the empty-merge check.
pub fn payload_map(bytes: &[u8]) -> Map<String, Value> {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(bytes) {
        return map;
    }
    let pairs: HashMap<String, String> =
        serde_urlencoded::from_bytes(bytes).unwrap_or_default();
    pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Merges two payload sources into one map; per key, the first non-empty
/// source wins. Returns `None` when the merged map carries no fields at
/// all, which callers report as an unparseable request.
pub fn merge_sources(
    first: Map<String, Value>,
    second: Map<String, Value>,
) -> Option<Map<String, Value>> {
    let mut merged = first;
    for (key, value) in second {
        match merged.get(&key) {
            Some(existing) if !is_empty_value(existing) => {}
            _ => {
                merged.insert(key, value);
            }
        }
    }
    if merged.is_empty() {
        None
    } else {
        Some(merged)
    }
}
