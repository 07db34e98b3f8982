//! Type definitions for path addressing.

/// A step in a JSON path.
///
/// Object keys are carried as-is; array indices are carried as their decimal
/// string form and coerced back to `usize` at use sites.
pub type PathStep = String;

/// A root-relative JSON path.
pub type Path = Vec<PathStep>;
