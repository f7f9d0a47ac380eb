//! Document store trait for pluggable storage backends.

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;
use crate::types::{Document, DocumentPath, Fields};

/// A single write inside an atomic batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Upsert with full overwrite.
    Set {
        /// Target collection.
        collection: String,
        /// Target document id.
        id: String,
        /// New field map.
        fields: Fields,
    },
    /// Shallow merge into an existing document.
    Update {
        /// Target collection.
        collection: String,
        /// Target document id.
        id: String,
        /// Fields to merge.
        fields: Fields,
    },
}

impl WriteOp {
    /// Builds a `Set` operation.
    pub fn set(collection: impl Into<String>, id: impl Into<String>, fields: Fields) -> Self {
        Self::Set {
            collection: collection.into(),
            id: id.into(),
            fields,
        }
    }

    /// Builds an `Update` operation.
    pub fn update(collection: impl Into<String>, id: impl Into<String>, fields: Fields) -> Self {
        Self::Update {
            collection: collection.into(),
            id: id.into(),
            fields,
        }
    }
}

/// Equality filter used by [`DocumentStore::commit_guarded`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    /// Collection to scan.
    pub collection: String,
    /// Top-level field compared.
    pub field: String,
    /// Value the field must equal.
    pub value: Value,
}

impl FieldMatch {
    /// Builds a filter on `collection.field == value`.
    pub fn new(collection: impl Into<String>, field: impl Into<String>, value: Value) -> Self {
        Self {
            collection: collection.into(),
            field: field.into(),
            value,
        }
    }
}

/// Turns the documents matched under the store's lock into the writes to apply.
pub type GuardedWrites = Box<dyn FnOnce(&[Document]) -> Vec<WriteOp> + Send>;

/// Trait for document storage backends (in-memory, PostgreSQL).
///
/// Documents are JSON objects addressed by a collection path and an id.
/// Timestamps written as [`crate::types::server_timestamp`] are resolved
/// by the backend at commit time.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a document. Returns `None` if it does not exist.
    async fn get_document(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    /// Get many documents in one round trip.
    ///
    /// Result `i` corresponds to `paths[i]`.
    async fn get_all(&self, paths: &[DocumentPath]) -> AppResult<Vec<Option<Document>>> {
        let reads = paths
            .iter()
            .map(|path| self.get_document(path.collection(), path.id()));
        futures::future::try_join_all(reads).await
    }

    /// Find documents whose `field` equals `value`, at most `limit` of them.
    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        limit: Option<usize>,
    ) -> AppResult<Vec<Document>>;

    /// Create or fully overwrite a document.
    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()>;

    /// Merge fields into an existing document. Fails with `NotFound` if absent.
    async fn update_fields(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()>;

    /// Apply all operations or none of them.
    async fn batch_commit(&self, ops: Vec<WriteOp>) -> AppResult<()>;

    /// Read the documents matching `filter` and commit the writes `build`
    /// derives from them as one isolated step: no other guarded commit on
    /// the same filter can interleave between the read and the write.
    ///
    /// Returns the documents `build` was given.
    async fn commit_guarded(
        &self,
        filter: FieldMatch,
        build: GuardedWrites,
    ) -> AppResult<Vec<Document>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
