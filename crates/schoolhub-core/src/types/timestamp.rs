//! Server-resolved timestamp sentinel.
//!
//! Writers place [`server_timestamp`] in a field; the store replaces it with
//! its own commit time when the write is applied.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::document::Fields;

const SENTINEL_KEY: &str = "$serverTimestamp";

/// Returns the sentinel value resolved by the store at commit time.
pub fn server_timestamp() -> Value {
    let mut sentinel = Fields::new();
    sentinel.insert(SENTINEL_KEY.to_string(), Value::Bool(true));
    Value::Object(sentinel)
}

/// Returns `true` if the value is the server timestamp sentinel.
pub fn is_server_timestamp(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|m| m.len() == 1 && m.get(SENTINEL_KEY) == Some(&Value::Bool(true)))
}

/// Replaces every top-level sentinel in `fields` with `now` (RFC 3339).
pub fn resolve_server_timestamps(fields: &mut Fields, now: DateTime<Utc>) {
    let stamp = Value::String(now.to_rfc3339_opts(SecondsFormat::Micros, true));
    for value in fields.values_mut() {
        if is_server_timestamp(value) {
            *value = stamp.clone();
        }
    }
}
