//! Best-effort structural diff: the set of changed paths between two values.
//!
//! Arrays are compared index-wise, so an insertion shifts every later index
//! into the changed set; that approximation is accepted, this is a highlight
//! hint for the renderer, not a patch.

use std::collections::BTreeSet;

use serde_json::Value;
use snipforge_json::PathStep;

/// Collect the dot-joined paths at which `a` and `b` differ.
///
/// A type or object/array shape mismatch marks its path and stops recursing;
/// a key or index present on only one side is marked without descending into
/// it. A difference at the root reports the empty path.
///
/// # Example
///
/// ```
/// use snipforge_engine::diff;
/// use serde_json::json;
///
/// let changed = diff(&json!({"a": 1, "b": 2}), &json!({"a": 1, "b": 3}));
/// assert_eq!(changed.into_iter().collect::<Vec<_>>(), ["b"]);
/// ```
pub fn diff(a: &Value, b: &Value) -> BTreeSet<String> {
    let mut changed = BTreeSet::new();
    diff_at(&mut changed, &[], a, b);
    changed
}

fn diff_at(changed: &mut BTreeSet<String>, path: &[PathStep], a: &Value, b: &Value) {
    if a == b {
        return;
    }
    match (a, b) {
        (Value::Object(ma), Value::Object(mb)) => {
            for (key, va) in ma {
                let mut p = path.to_vec();
                p.push(key.clone());
                match mb.get(key) {
                    Some(vb) => diff_at(changed, &p, va, vb),
                    None => {
                        changed.insert(p.join("."));
                    }
                }
            }
            for key in mb.keys() {
                if !ma.contains_key(key) {
                    let mut p = path.to_vec();
                    p.push(key.clone());
                    changed.insert(p.join("."));
                }
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            let len = xs.len().max(ys.len());
            for index in 0..len {
                let mut p = path.to_vec();
                p.push(index.to_string());
                match (xs.get(index), ys.get(index)) {
                    (Some(x), Some(y)) => diff_at(changed, &p, x, y),
                    _ => {
                        changed.insert(p.join("."));
                    }
                }
            }
        }
        _ => {
            changed.insert(path.join("."));
        }
    }
}
