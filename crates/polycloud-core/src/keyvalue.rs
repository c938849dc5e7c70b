//! Property normalizer
//!
//! Flattens a provider's raw JSON-shaped resource representation into an
//! ordered list of opaque key/value attributes. Nested structures are
//! serialized to their canonical JSON text rather than recursively expanded,
//! so downstream consumers stay provider-agnostic.
//!
//! Contract: every key of the input appears exactly once in the output, no
//! value is silently dropped or coerced to empty, and ordering is stable
//! across repeated calls on identical input (serde_json is built with
//! `preserve_order`, so output follows the source object's field order).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One opaque provider attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Flatten a raw provider object into ordered key/value pairs
pub fn flatten(map: &serde_json::Map<String, Value>) -> Vec<KeyValue> {
    map.iter()
        .map(|(key, value)| KeyValue {
            key: key.clone(),
            value: render(value),
        })
        .collect()
}

/// Flatten an arbitrary raw value
///
/// Non-object input yields a single `value` entry rather than an error, so
/// callers can normalize any response shape a provider hands back.
pub fn flatten_value(raw: &Value) -> Vec<KeyValue> {
    match raw {
        Value::Object(map) => flatten(map),
        other => vec![KeyValue::new("value", render(other))],
    }
}

/// Canonical textual form of one field value
///
/// Strings pass through unquoted; everything else uses its JSON text.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
