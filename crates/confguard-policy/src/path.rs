//! Dotted field paths into a decoded document.

use serde_json::Value;

/// Parse a dotted field path (`spec.containers.0.image`) into its segments.
pub fn parse_path(raw: &str) -> Result<Vec<String>, String> {
    if raw.is_empty() {
        return Err("empty field path".to_string());
    }
    let mut segments = Vec::new();
    for segment in raw.split('.') {
        if segment.is_empty() {
            return Err(format!("empty segment in field path '{raw}'"));
        }
        segments.push(segment.to_string());
    }
    Ok(segments)
}

/// Resolve a field path against a document. Mapping segments index by key;
/// numeric segments index into sequences. Returns `None` when any step is
/// missing, which callers treat as undefined.
pub fn lookup<'v>(input: &'v Value, path: &[String]) -> Option<&'v Value> {
    let mut current = input;
    for segment in path {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Human name for a value's variant, used in type-error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "text",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
