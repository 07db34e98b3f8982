//! Path-addressed get/set/merge over JSON values.

use serde_json::{Map, Value};

use crate::types::PathStep;

/// Get the value at `path`, or `None` the moment a step cannot be resolved.
///
/// # Example
///
/// ```
/// use snipforge_json::get_at;
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [10, 20]}});
/// let path = vec!["a".to_string(), "b".to_string(), "1".to_string()];
/// assert_eq!(get_at(&doc, &path), Some(&json!(20)));
/// assert_eq!(get_at(&doc, &["missing".to_string()]), None);
/// ```
pub fn get_at<'a>(value: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut current = value;
    for step in path {
        match current {
            Value::Object(map) => {
                current = map.get(step)?;
            }
            Value::Array(arr) => {
                let idx: usize = step.parse().ok()?;
                current = arr.get(idx)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Return a new value with `new_value` placed at `path`.
///
/// The input is never mutated; every container on the access path is
/// rebuilt, everything off it is cloned as-is. An empty path replaces the
/// whole value. Array steps are coerced to integer indices and out-of-range
/// indices pad the array with `null`s. A missing or scalar intermediate is
/// materialized as an empty object even when the next step is numeric; this
/// matches longstanding caller expectations and is pinned by tests, so do
/// not "fix" it to create arrays.
pub fn set_at(value: &Value, path: &[PathStep], new_value: Value) -> Value {
    let Some((step, rest)) = path.split_first() else {
        return new_value;
    };
    match value {
        Value::Object(map) => {
            let mut map = map.clone();
            let child = if rest.is_empty() {
                new_value
            } else {
                set_at(map.get(step).unwrap_or(&Value::Null), rest, new_value)
            };
            map.insert(step.clone(), child);
            Value::Object(map)
        }
        Value::Array(arr) => {
            // A non-numeric step against an array has no JSON representation;
            // degrade to a no-op rather than corrupt the document.
            let Ok(idx) = step.parse::<usize>() else {
                return value.clone();
            };
            let mut items = arr.clone();
            while items.len() <= idx {
                items.push(Value::Null);
            }
            items[idx] = if rest.is_empty() {
                new_value
            } else {
                set_at(&items[idx], rest, new_value)
            };
            Value::Array(items)
        }
        _ => {
            let child = if rest.is_empty() {
                new_value
            } else {
                set_at(&Value::Null, rest, new_value)
            };
            let mut map = Map::new();
            map.insert(step.clone(), child);
            Value::Object(map)
        }
    }
}

/// Recursive merge favoring `b`.
///
/// Objects merge key-wise, recursing where both sides hold objects. Arrays
/// are taken from `b` wholesale, as is any type mismatch.
pub fn merge(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(ma), Value::Object(mb)) => {
            let mut out = ma.clone();
            for (key, vb) in mb {
                let merged = match ma.get(key) {
                    Some(va) => merge(va, vb),
                    None => vb.clone(),
                };
                out.insert(key.clone(), merged);
            }
            Value::Object(out)
        }
        _ => b.clone(),
    }
}
