//! Snippet field-detection and path-addressed JSON mutation engine.
//!
//! A "snippet" is a reusable JSON fragment anchored at a root key, annotated
//! with a field tree that records which parts are user-editable and how. This
//! crate is the pure-logic core behind a snippet editor:
//!
//! - [`detect()`] infers a typed, path-addressed field tree from any JSON
//!   value;
//! - [`mutate`] rewrites that tree (editability, defaults, bounds, re-typing)
//!   without ever disturbing ids or paths;
//! - [`Composer`] inserts, removes and reorders snippet subtrees in a target
//!   document and writes field edits through at their recorded paths;
//! - [`diff()`] reports which paths changed between two documents so a
//!   renderer can highlight them;
//! - [`MemoryStore`] holds the ordered snippet collection behind the
//!   [`SnippetStore`] interface.
//!
//! Everything is synchronous and total: data-shape surprises degrade to
//! no-ops, never panics, because transient invalid states are normal while a
//! user is mid-edit.
//!
//! # Example
//!
//! ```
//! use snipforge_engine::{detect, Composer, FieldKind, SnippetDefinition};
//! use serde_json::json;
//!
//! let snippet = SnippetDefinition::from_source(
//!     "POI info",
//!     "map.json",
//!     "Overlays",
//!     r#"{"poiInfo": {"showLabels": true, "radius": 5}}"#,
//! )
//! .unwrap();
//! assert_eq!(snippet.root_key, "poiInfo");
//! assert!(matches!(snippet.fields[0].kind, FieldKind::Boolean { .. }));
//!
//! let snippets = [snippet];
//! let composer = Composer::new(&snippets);
//! let doc = composer.insert(&json!({}), &snippets[0]);
//! assert_eq!(doc, json!({"poiInfo": {"showLabels": true, "radius": 5}}));
//! ```

pub mod compose;
pub mod detect;
pub mod diff;
pub mod field;
pub mod mutate;
pub mod snippet;
pub mod store;

pub use compose::Composer;
pub use detect::{detect, Detection};
pub use diff::diff;
pub use field::{field_id, find_field, FieldConfig, FieldKind, ROOT_FIELD_ID};
pub use mutate::{set_default, set_editable, set_kind, set_number_bounds, TargetKind};
pub use snippet::SnippetDefinition;
pub use store::{MemoryStore, SnippetStore, StoreError};
