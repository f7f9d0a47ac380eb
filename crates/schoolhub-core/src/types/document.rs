//! Stored document representation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::result::AppResult;

use super::path::DocumentPath;

/// The field map of a document.
pub type Fields = Map<String, Value>;

/// A document read from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Collection path the document lives in (no leading separator).
    pub collection: String,
    /// Document identifier within the collection.
    pub id: String,
    /// Stored fields.
    pub fields: Fields,
}

impl Document {
    /// Creates a document value.
    pub fn new(collection: impl Into<String>, id: impl Into<String>, fields: Fields) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            fields,
        }
    }

    /// Absolute path of this document, e.g. `/users/u1`.
    pub fn path(&self) -> String {
        DocumentPath::new(&self.collection, &self.id).to_string()
    }

    /// Returns a field value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Deserializes the field map into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            AppError::with_source(
                crate::error::ErrorKind::Serialization,
                format!("Malformed document '{}'", self.path()),
                e,
            )
        })
    }
}

/// Serializes a model into a field map. Non-object values are rejected.
pub fn encode_fields<T: Serialize>(value: &T) -> AppResult<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::internal(format!(
            "Expected an object when encoding document fields, got {other}"
        ))),
    }
}
