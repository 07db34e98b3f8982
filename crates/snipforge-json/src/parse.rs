//! Safe JSON parse and pretty-print.
//!
//! Parse failures are reported as values, never panics, so callers can render
//! inline error messages while the user is mid-edit.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty input")]
    Empty,
    #[error("{0}")]
    Invalid(String),
}

/// Matches text that looks like a bare `key: value` fragment, with an
/// optionally quoted key.
static PARTIAL_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"?[A-Za-z0-9_$]+"?\s*:"#).expect("partial-object regex"));

/// Parse JSON text into a [`Value`].
///
/// On a standard parse failure, attempts "partial object" recovery: if the
/// trimmed text looks like a `key: value` fragment it is retried wrapped in
/// `{ }`. If both attempts fail, the original parser's message is returned.
/// Blank input is a distinct [`ParseError::Empty`] and is not handed to the
/// parser at all.
///
/// # Example
///
/// ```
/// use snipforge_json::parse;
/// use serde_json::json;
///
/// assert_eq!(parse(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
/// assert_eq!(parse(r#""poiInfo": {"x": 1}"#).unwrap(), json!({"poiInfo": {"x": 1}}));
/// assert!(parse("   ").is_err());
/// ```
pub fn parse(text: &str) -> Result<Value, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(err) => {
            if PARTIAL_OBJECT_RE.is_match(trimmed) {
                let wrapped = format!("{{{trimmed}}}");
                if let Ok(value) = serde_json::from_str(&wrapped) {
                    return Ok(value);
                }
            }
            Err(ParseError::Invalid(err.to_string()))
        }
    }
}

/// Pretty-print a [`Value`] with 2-space indentation.
///
/// Returns an empty string if the value fails to serialize; never panics.
pub fn format(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
