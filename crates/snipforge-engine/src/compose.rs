//! Snippet-to-document composition.
//!
//! A [`Composer`] borrows the snippet collection in its canonical order and
//! inserts, removes and reorders snippet subtrees in a target document. The
//! document is assumed object-shaped at the top level; anything else passes
//! through unchanged. Composition never errors and never corrupts the
//! document.

use serde_json::{Map, Value};
use snipforge_json::{get_at, set_at, Path};
use tracing::debug;

use crate::field::FieldConfig;
use crate::snippet::SnippetDefinition;

pub struct Composer<'a> {
    snippets: &'a [SnippetDefinition],
}

impl<'a> Composer<'a> {
    /// `snippets` supplies the canonical key order used by [`reorder`].
    ///
    /// [`reorder`]: Composer::reorder
    pub fn new(snippets: &'a [SnippetDefinition]) -> Self {
        Self { snippets }
    }

    /// True iff the document is an object carrying the snippet's root key.
    pub fn is_present(&self, doc: &Value, snippet: &SnippetDefinition) -> bool {
        matches!(doc, Value::Object(map) if map.contains_key(&snippet.root_key))
    }

    /// Insert the snippet's subtree into the document at its root key.
    ///
    /// A no-op when the snippet is already present or the document is not an
    /// object. The inserted subtree comes from `parsed_snippet`: the value
    /// under the root key when it carries one, all top-level pairs for a
    /// multi-root snippet, or the whole parsed value anchored under the root
    /// key otherwise. Snippet keys win over existing document keys (shallow
    /// union, not a deep merge), and the result is reordered canonically.
    pub fn insert(&self, doc: &Value, snippet: &SnippetDefinition) -> Value {
        if self.is_present(doc, snippet) {
            return doc.clone();
        }
        let Value::Object(map) = doc else {
            return doc.clone();
        };
        debug!(snippet_id = %snippet.id, root_key = %snippet.root_key, "inserting snippet");
        let mut map = map.clone();
        for (key, val) in subtree_for(snippet) {
            map.insert(key, val);
        }
        self.reorder(&Value::Object(map))
    }

    /// Shallow-delete the snippet's root key, then reorder.
    pub fn remove(&self, doc: &Value, snippet: &SnippetDefinition) -> Value {
        let Value::Object(map) = doc else {
            return doc.clone();
        };
        debug!(snippet_id = %snippet.id, root_key = %snippet.root_key, "removing snippet");
        let mut map = map.clone();
        map.shift_remove(&snippet.root_key);
        self.reorder(&Value::Object(map))
    }

    /// Emit the document's keys with snippet-claimed root keys first, in
    /// canonical snippet order, and every unclaimed key after them in its
    /// original relative order.
    ///
    /// Purely cosmetic (JSON key order carries no meaning) but keeps the
    /// rendered output stable and diff-friendly.
    pub fn reorder(&self, doc: &Value) -> Value {
        let Value::Object(map) = doc else {
            return doc.clone();
        };
        let mut out = Map::new();
        for snippet in self.snippets {
            if let Some(val) = map.get(&snippet.root_key) {
                if !out.contains_key(&snippet.root_key) {
                    out.insert(snippet.root_key.clone(), val.clone());
                }
            }
        }
        for (key, val) in map {
            if !out.contains_key(key) {
                out.insert(key.clone(), val.clone());
            }
        }
        Value::Object(out)
    }

    /// Write a field edit through to the document at the field's recorded
    /// path.
    ///
    /// The root key is prefixed onto the field path only when the document
    /// actually holds a value under it; otherwise the field path is treated
    /// as already absolute (the multi-root snippet case).
    pub fn apply_field_edit(
        &self,
        doc: &Value,
        snippet: &SnippetDefinition,
        field: &FieldConfig,
        value: Value,
    ) -> Value {
        let mut path: Path = Vec::with_capacity(field.path.len() + 1);
        if get_at(doc, std::slice::from_ref(&snippet.root_key)).is_some() {
            path.push(snippet.root_key.clone());
        }
        path.extend(field.path.iter().cloned());
        set_at(doc, &path, value)
    }
}

/// Derive the key/value pairs a snippet contributes to a document.
fn subtree_for(snippet: &SnippetDefinition) -> Vec<(String, Value)> {
    match &snippet.parsed_snippet {
        Value::Object(map) if map.contains_key(&snippet.root_key) => map
            .get(&snippet.root_key)
            .map(|val| vec![(snippet.root_key.clone(), val.clone())])
            .unwrap_or_default(),
        Value::Object(map) if !map.is_empty() => map
            .iter()
            .map(|(key, val)| (key.clone(), val.clone()))
            .collect(),
        other => vec![(snippet.root_key.clone(), other.clone())],
    }
}
