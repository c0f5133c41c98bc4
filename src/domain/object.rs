//! Helpers for JSON field bags: zero-value pruning and chart option merging.

use serde_json::{Map, Value};
use tracing::instrument;

/// Values treated as "empty": `null`, `""`, `[]` and `{}`.
pub fn default_zero_values() -> Vec<Value> {
    vec![
        Value::Null,
        Value::String(String::new()),
        Value::Array(Vec::new()),
        Value::Object(Map::new()),
    ]
}

/// Copy of `object` without the entries whose value deep-equals one of
/// `zero_values`.
pub fn remove_zero_value_keys(object: &Map<String, Value>, zero_values: &[Value]) -> Map<String, Value> {
    object
        .iter()
        .filter(|(_, value)| !zero_values.contains(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Deep-merges `overrides` onto `defaults`.
///
/// Objects merge key by key. Two arrays are combined index by index: a
/// missing slot takes the override item, objects and arrays merge into the
/// slot, and scalars are appended unless `defaults` already holds them.
/// Any other pairing takes the override as is.
#[instrument(level = "trace", skip_all)]
pub fn merge_options(defaults: Value, overrides: Value) -> Value {
    match (defaults, overrides) {
        (Value::Object(mut target), Value::Object(source)) => {
            for (key, value) in source {
                let merged = match target.remove(&key) {
                    Some(existing) if is_mergeable(&value) => merge_options(existing, value),
                    _ => value,
                };
                target.insert(key, merged);
            }
            Value::Object(target)
        }
        (Value::Array(target), Value::Array(source)) => Value::Array(combine_arrays(target, source)),
        (_, overrides) => overrides,
    }
}

fn combine_arrays(target: Vec<Value>, source: Vec<Value>) -> Vec<Value> {
    let mut combined = target.clone();
    for (idx, item) in source.into_iter().enumerate() {
        if idx >= combined.len() {
            combined.push(item);
        } else if is_mergeable(&item) {
            let base = target.get(idx).cloned().unwrap_or(Value::Null);
            combined[idx] = merge_options(base, item);
        } else if !target.contains(&item) {
            combined.push(item);
        }
    }
    combined
}

fn is_mergeable(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_remove_zero_value_keys_with_defaults() {
        let input = object(json!({"a": "", "b": "abc", "d": null, "f": -1, "g": [], "h": {}, "i": 0}));
        let result = remove_zero_value_keys(&input, &default_zero_values());
        assert_eq!(Value::Object(result), json!({"b": "abc", "f": -1, "i": 0}));
    }

    #[test]
    fn test_remove_zero_value_keys_with_custom_values() {
        let input = object(json!({"a": "", "b": "abc", "f": -1}));
        let mut zero = default_zero_values();
        zero.push(json!(-1));
        assert_eq!(Value::Object(remove_zero_value_keys(&input, &zero)), json!({"b": "abc"}));
    }

    #[test]
    fn test_merge_options_deep_merges_axis_objects() {
        let defaults = json!({
            "xAxis": [{
                "type": "category",
                "axisLine": {"lineStyle": {"color": "#40516B"}},
                "splitLine": {"lineStyle": {"color": "#37465C"}}
            }]
        });
        let overrides = json!({
            "xAxis": [{
                "boundaryGap": false,
                "splitLine": {"show": true},
                "data": [1, 2, 3, 4]
            }]
        });
        assert_eq!(
            merge_options(defaults, overrides),
            json!({
                "xAxis": [{
                    "type": "category",
                    "boundaryGap": false,
                    "axisLine": {"lineStyle": {"color": "#40516B"}},
                    "splitLine": {"lineStyle": {"color": "#37465C"}, "show": true},
                    "data": [1, 2, 3, 4]
                }]
            })
        );
    }

    #[test]
    fn test_merge_options_fills_empty_series() {
        let merged = merge_options(json!({"series": []}), json!({"series": [{"type": "line"}]}));
        assert_eq!(merged, json!({"series": [{"type": "line"}]}));
    }

    #[test]
    fn test_merge_options_appends_new_scalars_only() {
        let merged = merge_options(json!({"data": [1, 2]}), json!({"data": [2, 3, 4]}));
        // 2 is already known, 3 and 4 are appended
        assert_eq!(merged, json!({"data": [1, 2, 3, 4]}));
    }

    #[test]
    fn test_merge_options_scalar_override_wins() {
        assert_eq!(merge_options(json!({"a": {"b": 1}}), json!({"a": 5})), json!({"a": 5}));
        assert_eq!(merge_options(json!({"a": 5}), json!({"a": {"b": 1}})), json!({"a": {"b": 1}}));
    }
}
