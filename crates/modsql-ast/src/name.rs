//! Qualified object names

use std::fmt;

/// A dot-separated object name with one, two, or three components.
///
/// For a module this is `[module]` or `[schema, module]`; for a routine it
/// is `[routine]`, `[module, routine]`, or `[schema, module, routine]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub parts: Vec<String>,
}

impl QualifiedName {
    pub fn new(parts: Vec<String>) -> Self {
        QualifiedName { parts }
    }

    /// Single-component name.
    pub fn single(name: impl Into<String>) -> Self {
        QualifiedName { parts: vec![name.into()] }
    }

    /// The trailing (object) component.
    pub fn object_name(&self) -> &str {
        self.parts.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// The leading qualifier components, if any.
    pub fn qualifier(&self) -> &[String] {
        &self.parts[..self.parts.len().saturating_sub(1)]
    }

    pub fn is_qualified(&self) -> bool {
        self.parts.len() > 1
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}
