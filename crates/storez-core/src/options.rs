//! Backend configuration maps.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// String-keyed backend configuration (tokens, base URLs, ...).
pub type StoreOptions = BTreeMap<String, String>;

/// Placeholder written over credential values.
pub const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: &[&str] = &["token", "secret", "password", "key"];

/// Returns true if an option key looks like it holds a credential.
pub fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_MARKERS.iter().any(|m| key.contains(m))
}

/// Copies `options` into a JSON object with credential values redacted.
pub fn redact_options(options: &StoreOptions) -> Map<String, Value> {
    options
        .iter()
        .map(|(k, v)| {
            let value = if is_sensitive(k) { REDACTED } else { v.as_str() };
            (k.clone(), Value::String(value.to_string()))
        })
        .collect()
}
