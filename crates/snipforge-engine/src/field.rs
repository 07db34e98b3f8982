//! The field tree: a typed, path-addressed mirror of a JSON value's shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use snipforge_json::{Path, PathStep};

/// Id of a field whose path is empty (the snippet's own root value).
pub const ROOT_FIELD_ID: &str = "root";

/// One node of a field tree.
///
/// The per-kind payload lives in [`FieldKind`], so a container can never
/// carry a default value and a leaf can never carry children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Derived from `path` by [`field_id`]; unique within one tree and the
    /// sole handle used by mutators and the renderer.
    pub id: String,
    /// The raw source key, or an `name[index]` form for array elements.
    pub label: String,
    /// Root-relative location of the value this field mirrors.
    pub path: Path,
    /// Leaves detect as editable, containers as not; the operator can toggle
    /// either afterwards.
    pub editable: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Per-kind payload of a field node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    Boolean {
        #[serde(rename = "defaultValue")]
        default: bool,
    },
    Number {
        #[serde(rename = "defaultValue")]
        default: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    String {
        #[serde(rename = "defaultValue")]
        default: String,
    },
    Color {
        #[serde(rename = "defaultValue")]
        default: String,
        #[serde(rename = "supportsAlpha")]
        supports_alpha: bool,
    },
    Object {
        children: Vec<FieldConfig>,
    },
    Array {
        children: Vec<FieldConfig>,
    },
}

impl FieldConfig {
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self.kind,
            FieldKind::Object { .. } | FieldKind::Array { .. }
        )
    }

    pub fn children(&self) -> Option<&[FieldConfig]> {
        match &self.kind {
            FieldKind::Object { children } | FieldKind::Array { children } => Some(children),
            _ => None,
        }
    }

    /// The leaf's default rendered as a JSON value; `None` for containers.
    pub fn default_value(&self) -> Option<Value> {
        match &self.kind {
            FieldKind::Boolean { default } => Some(Value::Bool(*default)),
            FieldKind::Number { default, .. } => Some(serde_json::json!(default)),
            FieldKind::String { default } | FieldKind::Color { default, .. } => {
                Some(Value::String(default.clone()))
            }
            FieldKind::Object { .. } | FieldKind::Array { .. } => None,
        }
    }
}

/// Derive a field id from its path: segments joined with `.`, with the empty
/// path mapping to [`ROOT_FIELD_ID`].
pub fn field_id(path: &[PathStep]) -> String {
    if path.is_empty() {
        ROOT_FIELD_ID.to_string()
    } else {
        path.join(".")
    }
}

/// Depth-first lookup of a field by id anywhere in the forest.
pub fn find_field<'a>(forest: &'a [FieldConfig], id: &str) -> Option<&'a FieldConfig> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children() {
            if let Some(found) = find_field(children, id) {
                return Some(found);
            }
        }
    }
    None
}
