//! Class and style normalization.

use serde_json::{Map, Value};

use crate::options::HiddenStylePolicy;
use crate::value::{is_truthy, to_display_string};

// ═══════════════════════════════════════════════════════════════════════════════
// CLASS NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Flatten a class value of arbitrary nesting into one space-joined string.
///
/// Strings are kept when non-empty and numbers when non-zero; lists recurse;
/// mapping keys are kept when their value is truthy. Order is first-seen.
pub fn flatten_class_names(value: &Value) -> String {
    let mut names = Vec::new();
    collect_class_names(value, &mut names);
    names.join(" ")
}

fn collect_class_names(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::String(s) if !s.is_empty() => names.push(s.clone()),
        Value::Number(_) if is_truthy(value) => names.push(to_display_string(value)),
        Value::Array(items) => {
            for item in items {
                collect_class_names(item, names);
            }
        }
        Value::Object(map) => {
            names.extend(
                map.iter()
                    .filter(|(_, enabled)| is_truthy(enabled))
                    .map(|(name, _)| name.clone()),
            );
        }
        _ => {}
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STYLES
// ═══════════════════════════════════════════════════════════════════════════════

/// Shallow-merge a list of style mappings left to right. Later keys win;
/// entries that are not mappings are skipped.
pub fn merge_style_list(entries: &[Value]) -> Map<String, Value> {
    let mut merged = Map::new();
    for entry in entries {
        if let Value::Object(map) = entry {
            for (property, value) in map {
                merged.insert(property.clone(), value.clone());
            }
        }
    }
    merged
}

/// Normalize a style prop value: lists collapse into one mapping, anything
/// else is returned as is.
pub fn normalize_style(style: Value) -> Value {
    match style {
        Value::Array(entries) => Value::Object(merge_style_list(&entries)),
        other => other,
    }
}

/// Merge `display: none` into an existing (already normalized) style.
pub fn hide_style(style: Option<Value>, policy: HiddenStylePolicy) -> Value {
    let hidden = Value::String("none".to_string());
    let mut map = match style {
        Some(Value::Object(map)) => map,
        None | Some(Value::Null) => Map::new(),
        Some(other) => {
            tracing::debug!(style = %other, "replacing non-mapping style on hidden node");
            Map::new()
        }
    };

    match policy {
        HiddenStylePolicy::ForceHidden => {
            map.insert("display".to_string(), hidden);
        }
        HiddenStylePolicy::PreferExplicit => {
            map.entry("display").or_insert(hidden);
        }
    }
    Value::Object(map)
}
