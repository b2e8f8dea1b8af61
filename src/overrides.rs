//! Dotted-path CLI overrides with typed value coercion.
//!
//! Each `"server.port=8080"` entry is split at its first `=`, the value is
//! coerced, and the result assigned through the config tree, creating
//! intermediate mappings as needed. Overrides sit at the top of the
//! precedence order; later entries win over earlier ones.

use serde_json::{Map, Value};

/// Apply raw `key.path=value` override strings to a config mapping, in order.
///
/// Entries without `=` are skipped (non-fatal). Dotted keys address nested
/// paths; an existing non-mapping value along the path is overwritten with a
/// fresh mapping, never merged into.
pub fn apply_overrides(mut config: Map<String, Value>, entries: &[String]) -> Map<String, Value> {
    for entry in entries {
        let Some((key, raw_value)) = entry.split_once('=') else {
            tracing::debug!(%entry, "override entry has no '=', skipping");
            continue;
        };
        let segments: Vec<&str> = key.split('.').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            tracing::debug!(%entry, "override entry has an empty key path, skipping");
            continue;
        }
        set_nested(&mut config, &segments, coerce_value(raw_value.trim()));
    }
    config
}

fn set_nested(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let mut current = map;
    for segment in &segments[..segments.len() - 1] {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = slot
            .as_object_mut()
            .expect("intermediate override slot was just made an object");
    }
    current.insert(segments[segments.len() - 1].to_string(), value);
}

/// Coerce a trimmed override value.
///
/// `true`/`false`/`null` keywords, then optionally-signed integers and
/// decimals, then structured JSON for tokens opening with `{`, `[`, or `"`
/// (falling back to the literal string when the JSON is invalid), then the
/// literal string.
fn coerce_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(i.into());
    }
    if raw.contains('.')
        && let Ok(f) = raw.parse::<f64>()
        && let Some(n) = serde_json::Number::from_f64(f)
    {
        return Value::Number(n);
    }
    if matches!(raw.chars().next(), Some('{' | '[' | '"'))
        && let Ok(value) = serde_json::from_str(raw)
    {
        return value;
    }
    Value::String(raw.to_string())
}
