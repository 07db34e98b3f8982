//! Field detection: infer a typed, path-addressed field tree from a JSON
//! value.
//!
//! String classification is an ordered rule list, and the order is part of
//! the contract: label-based heuristics run before value-shape checks, so a
//! field named `labelColor` is a color even when its current value is not
//! color-shaped.

use serde_json::Value;
use snipforge_json::{has_alpha, is_hex_color, is_rgba_color, Path};

use crate::field::{field_id, FieldConfig, FieldKind, ROOT_FIELD_ID};

/// Result of [`detect`]: the root key the snippet anchors to, plus its field
/// forest (paths relative to the value under the root key).
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub root_key: String,
    pub fields: Vec<FieldConfig>,
}

/// Infer a field tree from a parsed JSON value.
///
/// Root-key policy:
/// - an object with exactly one key anchors at that key, and fields are
///   detected from the value under it (paths rooted at `[]`);
/// - an object with several keys produces one field subtree per key, each
///   rooted at `[key]`; `root_key` is the first key and is used for
///   grouping only — composition must not assume it prefixes every path;
/// - anything else anchors at the synthetic key `"root"` with a single
///   field at `[]`.
///
/// # Example
///
/// ```
/// use snipforge_engine::{detect, FieldKind};
/// use serde_json::json;
///
/// let detection = detect(&json!({"poiInfo": {"showLabels": true, "radius": 5}}));
/// assert_eq!(detection.root_key, "poiInfo");
/// assert_eq!(detection.fields.len(), 2);
/// assert_eq!(detection.fields[0].id, "showLabels");
/// assert!(matches!(detection.fields[1].kind, FieldKind::Number { .. }));
/// ```
pub fn detect(value: &Value) -> Detection {
    match value {
        Value::Object(map) => {
            // Single-key object: anchor at the key, detect underneath it.
            if map.len() == 1 {
                if let Some((key, inner)) = map.iter().next() {
                    return Detection {
                        root_key: key.clone(),
                        fields: fields_under(inner, key),
                    };
                }
            }
            // Multi-key (or empty) object: one subtree per top-level key,
            // with the first key kept for grouping.
            let root_key = map
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| ROOT_FIELD_ID.to_string());
            let fields = map
                .iter()
                .map(|(key, val)| classify(val, vec![key.clone()], key))
                .collect();
            Detection { root_key, fields }
        }
        _ => Detection {
            root_key: ROOT_FIELD_ID.to_string(),
            fields: vec![classify(value, Vec::new(), ROOT_FIELD_ID)],
        },
    }
}

/// Detect the forest for the value under a root key.
fn fields_under(value: &Value, label: &str) -> Vec<FieldConfig> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, val)| classify(val, vec![key.clone()], key))
            .collect(),
        _ => vec![classify(value, Vec::new(), label)],
    }
}

/// Classify one value into a field node, recursing into containers.
fn classify(value: &Value, path: Path, label: &str) -> FieldConfig {
    let id = field_id(&path);
    let (editable, kind) = match value {
        Value::Bool(b) => (true, FieldKind::Boolean { default: *b }),
        Value::Number(n) => (
            true,
            FieldKind::Number {
                default: n.as_f64().unwrap_or(0.0),
                min: None,
                max: None,
            },
        ),
        Value::String(s) => (true, classify_string(s, label)),
        // Nulls are never preserved as their own kind.
        Value::Null => (
            true,
            FieldKind::String {
                default: String::new(),
            },
        ),
        Value::Array(items) => {
            let children = items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let mut child_path = path.clone();
                    child_path.push(index.to_string());
                    classify(item, child_path, &format!("{label}[{index}]"))
                })
                .collect();
            (false, FieldKind::Array { children })
        }
        Value::Object(map) => {
            let children = map
                .iter()
                .map(|(key, val)| {
                    let mut child_path = path.clone();
                    child_path.push(key.clone());
                    classify(val, child_path, key)
                })
                .collect();
            (false, FieldKind::Object { children })
        }
    };
    FieldConfig {
        id,
        label: label.to_string(),
        path,
        editable,
        kind,
    }
}

/// Ordered classification rules for string values.
///
/// 1. A label containing `color` or `hex` forces the color kind.
/// 2. Otherwise a hex/rgba-shaped value is a color.
/// 3. Everything else is a plain string.
///
/// `supports_alpha` reflects the value's actual alpha channel; when the
/// classification was purely label-driven (the value is not color-shaped),
/// a label containing `alpha` or `rgba` opts in instead.
fn classify_string(value: &str, label: &str) -> FieldKind {
    let label_lc = label.to_ascii_lowercase();
    let label_driven = label_lc.contains("color") || label_lc.contains("hex");
    let value_is_color = is_hex_color(value) || is_rgba_color(value);
    if label_driven || value_is_color {
        let supports_alpha = if value_is_color {
            has_alpha(value)
        } else {
            label_lc.contains("alpha") || label_lc.contains("rgba")
        };
        FieldKind::Color {
            default: value.to_string(),
            supports_alpha,
        }
    } else {
        FieldKind::String {
            default: value.to_string(),
        }
    }
}
