//! Enrollment references stored on a user document.

use serde_json::Value;

/// A pointer from a user to a subject document.
///
/// Stored either as a reference object (`{"path": "school/.../subjects/x"}`)
/// or as a raw absolute path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectRef {
    /// A reference object exposing a document path.
    ReferenceHandle(String),
    /// A raw path string; must start with the separator to resolve.
    PathString(String),
}

impl SubjectRef {
    /// Normalizes a stored reference. Returns `None` for unsupported shapes.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(path) => Some(Self::PathString(path.clone())),
            Value::Object(map) => map
                .get("path")
                .and_then(Value::as_str)
                .map(|path| Self::ReferenceHandle(path.to_string())),
            _ => None,
        }
    }

    /// The path as carried by the reference.
    pub fn raw_path(&self) -> &str {
        match self {
            Self::ReferenceHandle(path) | Self::PathString(path) => path,
        }
    }
}
