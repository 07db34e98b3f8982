//! The persisted snippet entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snipforge_json::{parse, ParseError};
use uuid::Uuid;

use crate::detect::detect;
use crate::field::FieldConfig;

/// A named, reusable JSON fragment anchored at a root key, with a field tree
/// describing which parts are user-editable.
///
/// The field tree is exclusively owned by its snippet. Editing sessions must
/// work on a [`Clone`] and commit it back through the store, so an abandoned
/// edit never corrupts the persisted copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetDefinition {
    /// Opaque, generated at creation, stable for the snippet's life.
    pub id: String,
    pub name: String,
    /// Logical target file this snippet belongs to; grouping only.
    pub file_type: String,
    /// Secondary grouping tag for the UI accordion.
    pub accordion_group: String,
    /// Last known raw source text.
    pub snippet_text: String,
    /// `snippet_text` parsed; the value composition reads from.
    pub parsed_snippet: Value,
    /// Top-level key this snippet anchors to, or the `"root"` sentinel.
    pub root_key: String,
    /// Field forest with paths relative to the value under `root_key`.
    pub fields: Vec<FieldConfig>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SnippetDefinition {
    /// Parse `text` and detect its field tree in one step: the save flow's
    /// entry point when an operator finalizes a detected snippet.
    pub fn from_source(
        name: &str,
        file_type: &str,
        accordion_group: &str,
        text: &str,
    ) -> Result<Self, ParseError> {
        let parsed = parse(text)?;
        let detection = detect(&parsed);
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            file_type: file_type.to_string(),
            accordion_group: accordion_group.to_string(),
            snippet_text: text.to_string(),
            parsed_snippet: parsed,
            root_key: detection.root_key,
            fields: detection.fields,
            created_at: now,
            updated_at: now,
            description: None,
        })
    }

    /// Mark the snippet as modified.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use serde_json::json;

    #[test]
    fn test_from_source() {
        let snippet = SnippetDefinition::from_source(
            "POI info",
            "map.json",
            "Overlays",
            r#"{"poiInfo": {"showLabels": true}}"#,
        )
        .unwrap();
        assert_eq!(snippet.root_key, "poiInfo");
        assert_eq!(snippet.parsed_snippet, json!({"poiInfo": {"showLabels": true}}));
        assert!(matches!(snippet.fields[0].kind, FieldKind::Boolean { .. }));
        assert_eq!(snippet.created_at, snippet.updated_at);
        assert!(!snippet.id.is_empty());
    }

    #[test]
    fn test_from_source_rejects_bad_json() {
        assert!(SnippetDefinition::from_source("x", "f", "g", "{oops").is_err());
        assert!(SnippetDefinition::from_source("x", "f", "g", "   ").is_err());
    }

    #[test]
    fn test_from_source_accepts_partial_fragment() {
        let snippet =
            SnippetDefinition::from_source("x", "f", "g", r#""poiInfo": {"x": 1}"#).unwrap();
        assert_eq!(snippet.root_key, "poiInfo");
    }

    #[test]
    fn test_ids_are_unique_per_snippet() {
        let a = SnippetDefinition::from_source("a", "f", "g", "{}").unwrap();
        let b = SnippetDefinition::from_source("b", "f", "g", "{}").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serde_roundtrip() {
        let snippet = SnippetDefinition::from_source(
            "POI info",
            "map.json",
            "Overlays",
            r##"{"poiInfo": {"fillColor": "#ff0000", "radius": 5}}"##,
        )
        .unwrap();
        let text = serde_json::to_string(&snippet).unwrap();
        let back: SnippetDefinition = serde_json::from_str(&text).unwrap();
        assert_eq!(back, snippet);
    }
}
