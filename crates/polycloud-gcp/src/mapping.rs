//! Shared raw-response mapping helpers
//!
//! The normalizer surfaces every raw field; the overlap policy (which fields
//! are promoted into the typed model and therefore stripped from the opaque
//! attributes) lives here with the handlers, not in the normalizer.

use polycloud_core::{flatten, CloudError, KeyValue};
use serde_json::{Map, Value};

/// Trailing segment of a provider reference path
///
/// GCP cross-references resources by URL
/// (`.../projects/p/zones/z/instances/vm-1`); the final segment is the
/// resource name.
pub(crate) fn trailing_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Required string field, or a mapping failure naming what was missing
pub(crate) fn require_str<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    what: &str,
) -> Result<&'a str, CloudError> {
    obj.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| CloudError::MappingFailure(format!("{what} response missing `{key}`")))
}

/// System id as text; numbers and strings both occur on the wire
pub(crate) fn render_id(obj: &Map<String, Value>, fallback: &str) -> String {
    match obj.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) if !other.is_null() => other.to_string(),
        _ => fallback.to_string(),
    }
}

/// Flatten the raw object minus the fields already promoted into the model
pub(crate) fn opaque_attributes(obj: &Map<String, Value>, promoted: &[&str]) -> Vec<KeyValue> {
    let leftover: Map<String, Value> = obj
        .iter()
        .filter(|(key, _)| !promoted.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    flatten(&leftover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trailing_segment() {
        assert_eq!(
            trailing_segment("https://x/projects/p/zones/z/instances/vm-1"),
            "vm-1"
        );
        assert_eq!(trailing_segment("bare"), "bare");
    }

    #[test]
    fn test_opaque_attributes_strip_promoted() {
        let raw = json!({"name": "ip-1", "selfLink": "https://x/ip-1", "kind": "compute#address"});
        let obj = raw.as_object().unwrap();
        let attrs = opaque_attributes(obj, &["name"]);
        let keys: Vec<&str> = attrs.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["selfLink", "kind"]);
    }
}
