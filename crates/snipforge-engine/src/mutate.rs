//! Pure field-tree rewrites.
//!
//! All four operations share one traversal contract: locate the node with a
//! matching id anywhere in the forest, replace only that node, and rebuild
//! every ancestor container on the way back up. Ids and paths are never
//! touched, an absent id or a kind mismatch is a silent no-op, and every
//! operation is idempotent under reapplication.

use serde_json::Value;
use snipforge_json::{has_alpha, is_hex_color, is_rgba_color, to_hex};

use crate::field::{FieldConfig, FieldKind};

/// Target of a [`set_kind`] re-type. Colors split into solid and
/// alpha-carrying variants because the coercion differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    String,
    Number,
    ColorSolid,
    ColorAlpha,
}

/// Toggle the `editable` flag on the node with the given id.
pub fn set_editable(forest: &[FieldConfig], id: &str, editable: bool) -> Vec<FieldConfig> {
    rewrite(forest, id, &|mut node| {
        node.editable = editable;
        node
    })
}

/// Replace a leaf's default value.
///
/// The new value must match the leaf's kind (bool for boolean, number for
/// number, string for string/color); anything else, or a container target,
/// leaves the tree unchanged.
pub fn set_default(forest: &[FieldConfig], id: &str, value: &Value) -> Vec<FieldConfig> {
    let value = value.clone();
    rewrite(forest, id, &move |mut node| {
        match (&mut node.kind, &value) {
            (FieldKind::Boolean { default }, Value::Bool(b)) => *default = *b,
            (FieldKind::Number { default, .. }, Value::Number(n)) => {
                *default = n.as_f64().unwrap_or(*default)
            }
            (FieldKind::String { default }, Value::String(s))
            | (FieldKind::Color { default, .. }, Value::String(s)) => *default = s.clone(),
            _ => {}
        }
        node
    })
}

/// Set the numeric bounds of a number leaf; ignored for every other kind.
pub fn set_number_bounds(
    forest: &[FieldConfig],
    id: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Vec<FieldConfig> {
    rewrite(forest, id, &move |mut node| {
        if let FieldKind::Number {
            min: node_min,
            max: node_max,
            ..
        } = &mut node.kind
        {
            *node_min = min;
            *node_max = max;
        }
        node
    })
}

/// Re-type a leaf field, coercing its default value.
///
/// Containers are left alone. Conversions:
/// - to string: JS-style stringification of the current default;
/// - to number: leading-prefix float parse of the stringified default, `0`
///   when unparseable; clears any bounds;
/// - to solid color: recognized colors are normalized to hex with the alpha
///   channel truncated away, everything else becomes `#000000`;
/// - to alpha color: recognized colors gain an alpha channel (`FF`/`F`
///   appended to 6-/3-digit hex), everything else becomes `#000000FF`.
pub fn set_kind(forest: &[FieldConfig], id: &str, target: TargetKind) -> Vec<FieldConfig> {
    rewrite(forest, id, &move |mut node| {
        let current = match &node.kind {
            FieldKind::Boolean { default } => default.to_string(),
            FieldKind::Number { default, .. } => number_to_string(*default),
            FieldKind::String { default } | FieldKind::Color { default, .. } => default.clone(),
            FieldKind::Object { .. } | FieldKind::Array { .. } => return node,
        };
        node.kind = match target {
            TargetKind::String => FieldKind::String { default: current },
            TargetKind::Number => FieldKind::Number {
                default: parse_float_prefix(current.trim()).unwrap_or(0.0),
                min: None,
                max: None,
            },
            TargetKind::ColorSolid => FieldKind::Color {
                default: coerce_color_solid(&current),
                supports_alpha: false,
            },
            TargetKind::ColorAlpha => FieldKind::Color {
                default: coerce_color_alpha(&current),
                supports_alpha: true,
            },
        };
        node
    })
}

/// Rebuild the forest with `edit` applied to the node whose id matches.
///
/// Every ancestor container on the path to the match gets a fresh children
/// vector; untouched siblings are cloned as-is.
fn rewrite<F>(forest: &[FieldConfig], id: &str, edit: &F) -> Vec<FieldConfig>
where
    F: Fn(FieldConfig) -> FieldConfig,
{
    forest
        .iter()
        .map(|node| {
            if node.id == id {
                return edit(node.clone());
            }
            let mut node = node.clone();
            match &mut node.kind {
                FieldKind::Object { children } | FieldKind::Array { children } => {
                    *children = rewrite(children, id, edit);
                }
                _ => {}
            }
            node
        })
        .collect()
}

fn is_color_syntax(s: &str) -> bool {
    is_hex_color(s) || is_rgba_color(s)
}

fn coerce_color_solid(current: &str) -> String {
    if !is_color_syntax(current) {
        return "#000000".to_string();
    }
    let hex = to_hex(current);
    match hex.len() {
        9 => hex[..7].to_string(),
        5 => hex[..4].to_string(),
        _ => hex,
    }
}

fn coerce_color_alpha(current: &str) -> String {
    if !is_color_syntax(current) {
        return "#000000FF".to_string();
    }
    let mut hex = to_hex(current);
    match hex.len() {
        7 => hex.push_str("FF"),
        4 => hex.push('F'),
        _ => {}
    }
    debug_assert!(has_alpha(&hex));
    hex
}

/// Stringify an f64 the way JavaScript's `String(n)` does for the values
/// this engine produces: `Display` for `f64` already prints integral values
/// without a fractional part and never switches to scientific notation, so
/// no integral fast path is needed (a cast would saturate past `i64::MAX`).
fn number_to_string(n: f64) -> String {
    format!("{n}")
}

/// `parseFloat`-like prefix parse: consume an optional sign, digits, a
/// fractional part, and an exponent, ignoring trailing garbage.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut saw_digits = end > int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
            saw_digits = true;
        } else if saw_digits {
            // Trailing "5." parses as 5.
            end += 1;
        }
    }
    if !saw_digits {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].trim_end_matches('.').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect;
    use serde_json::json;

    fn sample_forest() -> Vec<FieldConfig> {
        detect(&json!({
            "cfg": {
                "radius": 5,
                "label": "hello",
                "fill": "#112233FF",
                "nested": {"on": true}
            }
        }))
        .fields
    }

    fn leaf<'a>(forest: &'a [FieldConfig], id: &str) -> &'a FieldConfig {
        crate::field::find_field(forest, id).unwrap()
    }

    #[test]
    fn test_set_editable() {
        let forest = sample_forest();
        let out = set_editable(&forest, "nested", true);
        assert!(leaf(&out, "nested").editable);
        // Siblings and descendants untouched.
        assert_eq!(leaf(&out, "radius"), leaf(&forest, "radius"));
        assert_eq!(leaf(&out, "nested.on"), leaf(&forest, "nested.on"));
    }

    #[test]
    fn test_set_editable_absent_id_is_noop() {
        let forest = sample_forest();
        assert_eq!(set_editable(&forest, "ghost", false), forest);
    }

    #[test]
    fn test_set_editable_idempotent() {
        let forest = sample_forest();
        let once = set_editable(&forest, "radius", false);
        let twice = set_editable(&once, "radius", false);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_default_matching_types() {
        let forest = sample_forest();
        let out = set_default(&forest, "radius", &json!(8.5));
        assert!(matches!(leaf(&out, "radius").kind, FieldKind::Number { default, .. } if default == 8.5));
        let out = set_default(&out, "label", &json!("world"));
        assert!(matches!(&leaf(&out, "label").kind, FieldKind::String { default } if default == "world"));
        let out = set_default(&out, "nested.on", &json!(false));
        assert!(matches!(leaf(&out, "nested.on").kind, FieldKind::Boolean { default: false }));
    }

    #[test]
    fn test_set_default_mismatch_is_noop() {
        let forest = sample_forest();
        assert_eq!(set_default(&forest, "radius", &json!("nope")), forest);
        assert_eq!(set_default(&forest, "nested", &json!(1)), forest);
    }

    #[test]
    fn test_set_number_bounds() {
        let forest = sample_forest();
        let out = set_number_bounds(&forest, "radius", Some(0.0), Some(10.0));
        assert!(matches!(
            leaf(&out, "radius").kind,
            FieldKind::Number { min: Some(min), max: Some(max), .. } if min == 0.0 && max == 10.0
        ));
        // Ignored for non-number kinds.
        assert_eq!(set_number_bounds(&forest, "label", Some(1.0), None), forest);
    }

    #[test]
    fn test_set_kind_preserves_id_and_path() {
        let forest = sample_forest();
        let out = set_kind(&forest, "label", TargetKind::Number);
        let field = leaf(&out, "label");
        assert_eq!(field.id, "label");
        assert_eq!(field.path, vec!["label"]);
    }

    #[test]
    fn test_set_kind_to_number() {
        let forest = sample_forest();
        let with_bounds = set_number_bounds(&forest, "radius", Some(0.0), Some(9.0));
        // String "hello" is unparseable.
        let out = set_kind(&with_bounds, "label", TargetKind::Number);
        assert!(matches!(leaf(&out, "label").kind, FieldKind::Number { default, .. } if default == 0.0));
        // Converting away and back clears bounds.
        let out = set_kind(&with_bounds, "radius", TargetKind::String);
        let out = set_kind(&out, "radius", TargetKind::Number);
        assert!(matches!(
            leaf(&out, "radius").kind,
            FieldKind::Number { default, min: None, max: None } if default == 5.0
        ));
    }

    #[test]
    fn test_set_kind_to_string() {
        let forest = sample_forest();
        let out = set_kind(&forest, "radius", TargetKind::String);
        assert!(matches!(&leaf(&out, "radius").kind, FieldKind::String { default } if default == "5"));
        let out = set_kind(&forest, "nested.on", TargetKind::String);
        assert!(matches!(&leaf(&out, "nested.on").kind, FieldKind::String { default } if default == "true"));
    }

    #[test]
    fn test_set_kind_color_roundtrip() {
        let forest = sample_forest();
        let solid = set_kind(&forest, "fill", TargetKind::ColorSolid);
        assert!(matches!(
            &leaf(&solid, "fill").kind,
            FieldKind::Color { default, supports_alpha: false } if default == "#112233"
        ));
        let back = set_kind(&solid, "fill", TargetKind::ColorAlpha);
        assert!(matches!(
            &leaf(&back, "fill").kind,
            FieldKind::Color { default, supports_alpha: true } if default == "#112233FF"
        ));
    }

    #[test]
    fn test_set_kind_color_fallbacks() {
        let forest = sample_forest();
        let out = set_kind(&forest, "label", TargetKind::ColorSolid);
        assert!(matches!(
            &leaf(&out, "label").kind,
            FieldKind::Color { default, .. } if default == "#000000"
        ));
        let out = set_kind(&forest, "label", TargetKind::ColorAlpha);
        assert!(matches!(
            &leaf(&out, "label").kind,
            FieldKind::Color { default, .. } if default == "#000000FF"
        ));
    }

    #[test]
    fn test_set_kind_short_hex() {
        let forest = detect(&json!({"cfg": {"tint": "#abcd"}})).fields;
        let solid = set_kind(&forest, "tint", TargetKind::ColorSolid);
        assert!(matches!(
            &leaf(&solid, "tint").kind,
            FieldKind::Color { default, .. } if default == "#abc"
        ));
        let alpha = set_kind(&solid, "tint", TargetKind::ColorAlpha);
        assert!(matches!(
            &leaf(&alpha, "tint").kind,
            FieldKind::Color { default, .. } if default == "#abcF"
        ));
    }

    #[test]
    fn test_set_kind_from_rgba_string() {
        let forest = detect(&json!({"cfg": {"wash": "rgba(255, 0, 0, 0.5)"}})).fields;
        let solid = set_kind(&forest, "wash", TargetKind::ColorSolid);
        assert!(matches!(
            &leaf(&solid, "wash").kind,
            FieldKind::Color { default, .. } if default == "#ff0000"
        ));
    }

    #[test]
    fn test_set_kind_container_is_noop() {
        let forest = sample_forest();
        assert_eq!(set_kind(&forest, "nested", TargetKind::String), forest);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("5"), Some(5.0));
        assert_eq!(parse_float_prefix("-2.5px"), Some(-2.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("px5"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(5.0), "5");
        assert_eq!(number_to_string(-3.0), "-3");
        assert_eq!(number_to_string(2.25), "2.25");
        // Integral values past i64's range still print in full.
        assert_eq!(number_to_string(1e19), "10000000000000000000");
    }

    #[test]
    fn test_set_kind_to_string_on_large_number() {
        let forest = detect(&json!({"cfg": {"seed": 1e19}})).fields;
        let out = set_kind(&forest, "seed", TargetKind::String);
        assert!(matches!(
            &leaf(&out, "seed").kind,
            FieldKind::String { default } if default == "10000000000000000000"
        ));
    }
}
