//! The snippet collection: ordering, lookup, and the persistence interface.
//!
//! The engine never serializes snippets itself; a storage collaborator owns
//! durability and implements [`SnippetStore`]. [`MemoryStore`] is the
//! reference implementation and the backing model for tests.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::debug;

use crate::snippet::SnippetDefinition;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Saving a new snippet whose root key + file type already exist is a
    /// destructive decision (replace vs. drop) and is surfaced to the
    /// caller, never resolved automatically.
    #[error("snippet with root key `{root_key}` already exists for `{file_type}`")]
    DuplicateRootKey {
        root_key: String,
        file_type: String,
        existing_id: String,
    },
    #[error("import failed: {0}")]
    Import(String),
}

/// Interface the persistence collaborator implements. The stored sequence is
/// ordered; that order is the canonical one consulted by the composer.
pub trait SnippetStore {
    fn list(&self) -> Vec<SnippetDefinition>;
    fn upsert(&mut self, snippet: SnippetDefinition);
    fn remove(&mut self, id: &str);
    /// Reorder the snippets of one `file_type` scope to match `ordered_ids`.
    /// Scoped snippets not named keep their relative order after the named
    /// ones; other scopes are untouched.
    fn reorder(&mut self, scope: &str, ordered_ids: &[String]);
    fn clear(&mut self);
}

/// Ordered in-memory snippet collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snippets: Vec<SnippetDefinition>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SnippetDefinition> {
        self.snippets.iter().find(|s| s.id == id)
    }

    pub fn by_file_type(&self, file_type: &str) -> Vec<&SnippetDefinition> {
        self.snippets
            .iter()
            .filter(|s| s.file_type == file_type)
            .collect()
    }

    /// Save a brand-new snippet, surfacing the duplicate-root-key conflict.
    ///
    /// The caller resolves a [`StoreError::DuplicateRootKey`] by either
    /// dropping the new snippet or calling [`MemoryStore::replace`] with the
    /// existing id.
    pub fn insert_new(&mut self, snippet: SnippetDefinition) -> Result<(), StoreError> {
        if let Some(existing) = self
            .snippets
            .iter()
            .find(|s| s.root_key == snippet.root_key && s.file_type == snippet.file_type)
        {
            return Err(StoreError::DuplicateRootKey {
                root_key: snippet.root_key.clone(),
                file_type: snippet.file_type.clone(),
                existing_id: existing.id.clone(),
            });
        }
        debug!(snippet_id = %snippet.id, root_key = %snippet.root_key, "inserting new snippet");
        self.snippets.push(snippet);
        Ok(())
    }

    /// The "replace" arm of the duplicate decision: the new snippet takes the
    /// existing one's slot in the order.
    pub fn replace(&mut self, existing_id: &str, mut snippet: SnippetDefinition) {
        match self.snippets.iter().position(|s| s.id == existing_id) {
            Some(index) => {
                debug!(existing_id, snippet_id = %snippet.id, "replacing snippet");
                snippet.touch();
                self.snippets[index] = snippet;
            }
            None => self.upsert(snippet),
        }
    }

    /// Serialize the whole ordered collection for backup.
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.snippets).unwrap_or_default()
    }

    /// Restore a collection exported by [`MemoryStore::export_json`],
    /// replacing the current contents. Returns how many snippets were
    /// imported.
    pub fn import_json(&mut self, text: &str) -> Result<usize, StoreError> {
        let snippets: Vec<SnippetDefinition> =
            serde_json::from_str(text).map_err(|err| StoreError::Import(err.to_string()))?;
        let count = snippets.len();
        debug!(count, "imported snippet collection");
        self.snippets = snippets;
        Ok(count)
    }
}

impl SnippetStore for MemoryStore {
    fn list(&self) -> Vec<SnippetDefinition> {
        self.snippets.clone()
    }

    fn upsert(&mut self, snippet: SnippetDefinition) {
        match self.snippets.iter().position(|s| s.id == snippet.id) {
            Some(index) => {
                debug!(snippet_id = %snippet.id, "updating snippet");
                self.snippets[index] = snippet;
            }
            None => {
                debug!(snippet_id = %snippet.id, "appending snippet");
                self.snippets.push(snippet);
            }
        }
    }

    fn remove(&mut self, id: &str) {
        debug!(snippet_id = %id, "removing snippet");
        self.snippets.retain(|s| s.id != id);
    }

    fn reorder(&mut self, scope: &str, ordered_ids: &[String]) {
        let original: Vec<SnippetDefinition> = self.snippets.drain(..).collect();
        let slot_in_scope: Vec<bool> = original.iter().map(|s| s.file_type == scope).collect();

        let mut scoped: Vec<SnippetDefinition> = Vec::new();
        let mut rest: VecDeque<SnippetDefinition> = VecDeque::new();
        for snippet in original {
            if snippet.file_type == scope {
                scoped.push(snippet);
            } else {
                rest.push_back(snippet);
            }
        }

        // Named ids first, in the requested order; unnamed scoped snippets
        // keep their relative order after them.
        let mut reordered: VecDeque<SnippetDefinition> = VecDeque::with_capacity(scoped.len());
        for id in ordered_ids {
            if let Some(index) = scoped.iter().position(|s| &s.id == id) {
                reordered.push_back(scoped.remove(index));
            }
        }
        reordered.extend(scoped);

        // Refill the original slots so interleaving with other scopes stays
        // stable.
        for in_scope in slot_in_scope {
            let next = if in_scope {
                reordered.pop_front()
            } else {
                rest.pop_front()
            };
            if let Some(snippet) = next {
                self.snippets.push(snippet);
            }
        }
        debug!(scope, count = self.snippets.len(), "reordered snippet scope");
    }

    fn clear(&mut self) {
        debug!("clearing snippet store");
        self.snippets.clear();
    }
}
