//! Field access on loosely-typed result items.
//!
//! Result items are raw `serde_json::Value`s; table columns address into
//! them with dot-notation paths from the registry. Anything absent, null,
//! or empty renders as the [`UNKNOWN`] placeholder.

use serde_json::Value;

/// Placeholder shown wherever a field is absent, null, or empty.
pub const UNKNOWN: &str = "Unknown";

/// Walk a dot-notation path into an item. Numeric segments index arrays.
fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = item;
    for part in path.split('.') {
        current = match part.parse::<usize>() {
            Ok(index) => current.get(index)?,
            Err(_) => current.get(part)?,
        };
    }
    Some(current)
}

/// Extract a display string for the value at `path`.
pub fn display_value(item: &Value, path: &str) -> String {
    match lookup(item, path) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(arr)) => format!("[{} items]", arr.len()),
        Some(Value::Object(_)) => "[object]".to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Length of the array at `path`, as a display string.
pub fn count_value(item: &Value, path: &str) -> String {
    match lookup(item, path) {
        Some(Value::Array(arr)) => arr.len().to_string(),
        _ => UNKNOWN.to_string(),
    }
}
