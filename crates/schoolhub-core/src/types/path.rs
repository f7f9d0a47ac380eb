//! Absolute document paths of the form `/collection/.../id`.

use std::fmt;

use crate::error::AppError;

/// Path separator used by document paths.
pub const SEPARATOR: char = '/';

/// A document address split into its collection path and id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    collection: String,
    id: String,
}

impl DocumentPath {
    /// Builds a path from a collection path and a document id.
    pub fn new(collection: &str, id: &str) -> Self {
        Self {
            collection: collection.trim_matches(SEPARATOR).to_string(),
            id: id.to_string(),
        }
    }

    /// Parses an absolute path. Empty segments are discarded; at least two
    /// segments (collection + id) are required.
    pub fn parse(path: &str) -> Result<Self, AppError> {
        let segments = segments(path);
        if segments.len() < 2 {
            return Err(AppError::bad_request(format!(
                "Document path '{path}' needs a collection and an id"
            )));
        }
        let (id, collection) = segments
            .split_last()
            .ok_or_else(|| AppError::bad_request("Empty document path"))?;
        Ok(Self {
            collection: collection.join("/"),
            id: (*id).to_string(),
        })
    }

    /// The collection path, without leading separator.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The document id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.collection, self.id)
    }
}

/// Splits a path on the separator, dropping empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}
