//! JSON utilities for the snippet engine.
//!
//! This crate is the pure value layer underneath the snippet tooling: safe
//! parse/pretty-print, path-addressed get/set/merge over [`serde_json::Value`],
//! and color-format detection/normalization. Everything here is a total
//! function: data-shape problems degrade to `None` or an unchanged value,
//! never a panic.
//!
//! # Example
//!
//! ```
//! use snipforge_json::{parse, format, get_at, set_at};
//! use serde_json::json;
//!
//! let doc = parse(r#"{"poiInfo": {"radius": 5}}"#).unwrap();
//!
//! let path = vec!["poiInfo".to_string(), "radius".to_string()];
//! assert_eq!(get_at(&doc, &path), Some(&json!(5)));
//!
//! let updated = set_at(&doc, &path, json!(9));
//! assert_eq!(get_at(&updated, &path), Some(&json!(9)));
//! // The input is untouched.
//! assert_eq!(get_at(&doc, &path), Some(&json!(5)));
//!
//! let text = format(&updated);
//! assert_eq!(parse(&text).unwrap(), updated);
//! ```

pub mod color;
pub mod parse;
pub mod path;
pub mod types;

pub use color::{has_alpha, is_hex_color, is_rgba_color, to_hex};
pub use parse::{format, parse, ParseError};
pub use path::{get_at, merge, set_at};
pub use types::{Path, PathStep};
