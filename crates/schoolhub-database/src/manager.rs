//! Store manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use schoolhub_core::config::StorageConfig;
use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{DocumentStore, FieldMatch, GuardedWrites, WriteOp};
use schoolhub_core::types::{Document, DocumentPath, Fields};

use crate::connection::DatabasePool;
use crate::memory::{MemoryDocumentStore, seed};
use crate::migration::run_migrations;
use crate::postgres::PgDocumentStore;

/// Document store wrapper selected from configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    inner: Arc<dyn DocumentStore>,
    provider: &'static str,
}

impl StoreManager {
    /// Create the configured provider.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "memory" => {
                info!("Initializing in-memory document store");
                let store = match &config.seed_file {
                    Some(path) => MemoryDocumentStore::with_documents(
                        seed::load_seed_file(path).await?,
                    ),
                    None => MemoryDocumentStore::new(),
                };
                Ok(Self {
                    inner: Arc::new(store),
                    provider: "memory",
                })
            }
            "postgres" => {
                info!("Initializing PostgreSQL document store");
                let pool = DatabasePool::connect(&config.postgres).await?;
                run_migrations(pool.pool()).await?;
                Ok(Self {
                    inner: Arc::new(PgDocumentStore::new(pool.into_pool())),
                    provider: "postgres",
                })
            }
            other => Err(AppError::configuration(format!(
                "Unknown storage provider: '{other}'. Supported: memory, postgres"
            ))),
        }
    }

    /// Name of the active provider.
    pub fn provider_name(&self) -> &'static str {
        self.provider
    }
}

#[async_trait]
impl DocumentStore for StoreManager {
    async fn get_document(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        self.inner.get_document(collection, id).await
    }

    async fn get_all(&self, paths: &[DocumentPath]) -> AppResult<Vec<Option<Document>>> {
        self.inner.get_all(paths).await
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        limit: Option<usize>,
    ) -> AppResult<Vec<Document>> {
        self.inner.query_equals(collection, field, value, limit).await
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
        self.inner.set_document(collection, id, fields).await
    }

    async fn update_fields(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
        self.inner.update_fields(collection, id, fields).await
    }

    async fn batch_commit(&self, ops: Vec<WriteOp>) -> AppResult<()> {
        self.inner.batch_commit(ops).await
    }

    async fn commit_guarded(
        &self,
        filter: FieldMatch,
        build: GuardedWrites,
    ) -> AppResult<Vec<Document>> {
        self.inner.commit_guarded(filter, build).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
