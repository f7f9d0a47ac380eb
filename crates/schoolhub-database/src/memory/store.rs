//! In-memory [`DocumentStore`] backed by a single lock.
//!
//! Every collection lives in one map behind one `RwLock`, so a batch is
//! applied under a single write guard and is atomic with respect to readers.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{DocumentStore, FieldMatch, GuardedWrites, WriteOp};
use schoolhub_core::types::{Document, DocumentPath, Fields, resolve_server_timestamps};

type Collections = HashMap<String, BTreeMap<String, Fields>>;

/// Process-local document store.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    data: RwLock<Collections>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with documents, keyed by collection then id.
    pub fn with_documents(documents: Collections) -> Self {
        let count: usize = documents.values().map(BTreeMap::len).sum();
        debug!(collections = documents.len(), documents = count, "Memory store seeded");
        Self {
            data: RwLock::new(documents),
        }
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        let data = self.data.read().await;
        data.get(collection).map(BTreeMap::len).unwrap_or(0)
    }
}

fn lookup(data: &Collections, collection: &str, id: &str) -> Option<Document> {
    data.get(collection)
        .and_then(|docs| docs.get(id))
        .map(|fields| Document::new(collection, id, fields.clone()))
}

fn matching(
    data: &Collections,
    collection: &str,
    field: &str,
    value: &Value,
    limit: Option<usize>,
) -> Vec<Document> {
    let Some(docs) = data.get(collection) else {
        return Vec::new();
    };
    docs.iter()
        .filter(|(_, fields)| fields.get(field) == Some(value))
        .take(limit.unwrap_or(usize::MAX))
        .map(|(id, fields)| Document::new(collection, id.as_str(), fields.clone()))
        .collect()
}

fn apply_batch(data: &mut Collections, ops: Vec<WriteOp>, now: DateTime<Utc>) -> AppResult<()> {
    // Stage every write first; nothing touches `data` until all ops validate.
    let mut staged: Vec<((String, String), Fields)> = Vec::with_capacity(ops.len());
    for op in ops {
        match op {
            WriteOp::Set {
                collection,
                id,
                mut fields,
            } => {
                resolve_server_timestamps(&mut fields, now);
                staged.retain(|(key, _)| key.0 != collection || key.1 != id);
                staged.push(((collection, id), fields));
            }
            WriteOp::Update {
                collection,
                id,
                mut fields,
            } => {
                resolve_server_timestamps(&mut fields, now);
                let position = staged
                    .iter()
                    .position(|(key, _)| key.0 == collection && key.1 == id);
                let mut merged = match position {
                    Some(index) => staged.remove(index).1,
                    None => data
                        .get(&collection)
                        .and_then(|docs| docs.get(&id))
                        .cloned()
                        .ok_or_else(|| {
                            AppError::not_found(format!(
                                "Document '{}' not found",
                                DocumentPath::new(&collection, &id)
                            ))
                        })?,
                };
                merged.extend(fields);
                staged.push(((collection, id), merged));
            }
        }
    }

    for ((collection, id), fields) in staged {
        data.entry(collection).or_default().insert(id, fields);
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let data = self.data.read().await;
        Ok(lookup(&data, collection, id))
    }

    async fn get_all(&self, paths: &[DocumentPath]) -> AppResult<Vec<Option<Document>>> {
        let data = self.data.read().await;
        Ok(paths
            .iter()
            .map(|path| lookup(&data, path.collection(), path.id()))
            .collect())
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        limit: Option<usize>,
    ) -> AppResult<Vec<Document>> {
        let data = self.data.read().await;
        Ok(matching(&data, collection, field, value, limit))
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
        self.batch_commit(vec![WriteOp::set(collection, id, fields)])
            .await
    }

    async fn update_fields(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
        self.batch_commit(vec![WriteOp::update(collection, id, fields)])
            .await
    }

    async fn batch_commit(&self, ops: Vec<WriteOp>) -> AppResult<()> {
        let now = Utc::now();
        let mut data = self.data.write().await;
        apply_batch(&mut data, ops, now)
    }

    async fn commit_guarded(
        &self,
        filter: FieldMatch,
        build: GuardedWrites,
    ) -> AppResult<Vec<Document>> {
        let now = Utc::now();
        let mut data = self.data.write().await;

        let matched = matching(&data, &filter.collection, &filter.field, &filter.value, None);
        let ops = build(matched.as_slice());
        apply_batch(&mut data, ops, now)?;
        Ok(matched)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::error::ErrorKind;
    use schoolhub_core::types::server_timestamp;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_batch_is_all_or_nothing() {
        let store = MemoryDocumentStore::new();
        store
            .set_document("sessions", "old", fields(json!({"active": true})))
            .await
            .unwrap();

        let result = store
            .batch_commit(vec![
                WriteOp::update("sessions", "old", fields(json!({"active": false}))),
                WriteOp::update("sessions", "missing", fields(json!({"active": false}))),
                WriteOp::set("sessions", "new", fields(json!({"active": true}))),
            ])
            .await;

        assert_eq!(result.unwrap_err().kind, ErrorKind::NotFound);
        let old = store.get_document("sessions", "old").await.unwrap().unwrap();
        assert_eq!(old.fields["active"], json!(true));
        assert!(store.get_document("sessions", "new").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_and_resolves_timestamps() {
        let store = MemoryDocumentStore::new();
        store
            .set_document("users", "u1", fields(json!({"email": "a", "is_new": true})))
            .await
            .unwrap();
        store
            .update_fields(
                "users",
                "u1",
                fields(json!({"is_new": false, "updated_at": server_timestamp()})),
            )
            .await
            .unwrap();

        let doc = store.get_document("users", "u1").await.unwrap().unwrap();
        assert_eq!(doc.fields["email"], json!("a"));
        assert_eq!(doc.fields["is_new"], json!(false));
        assert!(doc.fields["updated_at"].is_string());
    }

    #[tokio::test]
    async fn test_commit_guarded_sees_matches_and_applies_writes() {
        let store = MemoryDocumentStore::new();
        store
            .set_document("sessions", "a", fields(json!({"user_id": "u1", "active": true})))
            .await
            .unwrap();
        store
            .set_document("sessions", "b", fields(json!({"user_id": "u2", "active": true})))
            .await
            .unwrap();

        let matched = store
            .commit_guarded(
                FieldMatch::new("sessions", "user_id", json!("u1")),
                Box::new(|docs: &[Document]| {
                    docs.iter()
                        .map(|doc| {
                            WriteOp::update("sessions", doc.id.clone(), fields(json!({"active": false})))
                        })
                        .collect()
                }),
            )
            .await
            .unwrap();

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "a");
        let a = store.get_document("sessions", "a").await.unwrap().unwrap();
        assert_eq!(a.fields["active"], json!(false));
        let b = store.get_document("sessions", "b").await.unwrap().unwrap();
        assert_eq!(b.fields["active"], json!(true));
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let store = MemoryDocumentStore::new();
        let err = store
            .update_fields("users", "ghost", Fields::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_get_all_preserves_order() {
        let store = MemoryDocumentStore::new();
        store.set_document("c", "a", Fields::new()).await.unwrap();
        store.set_document("c", "b", Fields::new()).await.unwrap();

        let paths = vec![
            DocumentPath::new("c", "b"),
            DocumentPath::new("c", "zzz"),
            DocumentPath::new("c", "a"),
        ];
        let docs = store.get_all(&paths).await.unwrap();
        let ids: Vec<Option<&str>> = docs
            .iter()
            .map(|d| d.as_ref().map(|d| d.id.as_str()))
            .collect();
        assert_eq!(ids, vec![Some("b"), None, Some("a")]);
    }

    #[tokio::test]
    async fn test_query_equals_respects_limit() {
        let store = MemoryDocumentStore::new();
        for id in ["s1", "s2", "s3"] {
            store
                .set_document("sessions", id, fields(json!({"user_id": "u1"})))
                .await
                .unwrap();
        }
        store
            .set_document("sessions", "s4", fields(json!({"user_id": "u2"})))
            .await
            .unwrap();

        let all = store
            .query_equals("sessions", "user_id", &json!("u1"), None)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let one = store
            .query_equals("sessions", "user_id", &json!("u1"), Some(1))
            .await
            .unwrap();
        assert_eq!(one.len(), 1);

        let none = store
            .query_equals("nothing", "user_id", &json!("u1"), None)
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
