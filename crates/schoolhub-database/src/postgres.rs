//! PostgreSQL [`DocumentStore`] over a single `documents` table.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::postgres::PgConnection;
use sqlx::types::Json;
use sqlx::PgPool;

use schoolhub_core::error::{AppError, ErrorKind};
use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{DocumentStore, FieldMatch, GuardedWrites, WriteOp};
use schoolhub_core::types::{Document, DocumentPath, Fields, resolve_server_timestamps};

/// Document store persisting each document as a JSONB row.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an already migrated pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

async fn apply(conn: &mut PgConnection, op: WriteOp) -> AppResult<()> {
    match op {
        WriteOp::Set {
            collection,
            id,
            fields,
        } => {
            sqlx::query(
                "INSERT INTO documents (collection, id, fields) VALUES ($1, $2, $3) \
                 ON CONFLICT (collection, id) DO UPDATE SET fields = EXCLUDED.fields",
            )
            .bind(&collection)
            .bind(&id)
            .bind(Json(fields))
            .execute(&mut *conn)
            .await
            .map_err(db_error("Failed to write document"))?;
        }
        WriteOp::Update {
            collection,
            id,
            fields,
        } => {
            let result = sqlx::query(
                "UPDATE documents SET fields = fields || $3 WHERE collection = $1 AND id = $2",
            )
            .bind(&collection)
            .bind(&id)
            .bind(Json(fields))
            .execute(&mut *conn)
            .await
            .map_err(db_error("Failed to update document"))?;

            if result.rows_affected() == 0 {
                return Err(AppError::not_found(format!(
                    "Document '{}' not found",
                    DocumentPath::new(&collection, &id)
                )));
            }
        }
    }
    Ok(())
}

fn resolve(op: &mut WriteOp, now: chrono::DateTime<Utc>) {
    match op {
        WriteOp::Set { fields, .. } | WriteOp::Update { fields, .. } => {
            resolve_server_timestamps(fields, now)
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let row: Option<Json<Fields>> = sqlx::query_scalar(
            "SELECT fields FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to read document"))?;

        Ok(row.map(|Json(fields)| Document::new(collection, id, fields)))
    }

    async fn get_all(&self, paths: &[DocumentPath]) -> AppResult<Vec<Option<Document>>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let collections: Vec<String> = paths.iter().map(|p| p.collection().to_string()).collect();
        let ids: Vec<String> = paths.iter().map(|p| p.id().to_string()).collect();

        let rows: Vec<(String, String, Json<Fields>)> = sqlx::query_as(
            "SELECT d.collection, d.id, d.fields FROM documents d \
             JOIN unnest($1::text[], $2::text[]) AS p(collection, id) \
             ON d.collection = p.collection AND d.id = p.id",
        )
        .bind(&collections)
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to read documents"))?;

        let found: HashMap<(String, String), Fields> = rows
            .into_iter()
            .map(|(collection, id, Json(fields))| ((collection, id), fields))
            .collect();

        Ok(paths
            .iter()
            .map(|path| {
                let key = (path.collection().to_string(), path.id().to_string());
                found
                    .get(&key)
                    .map(|fields| Document::new(key.0.clone(), key.1.clone(), fields.clone()))
            })
            .collect())
    }

    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
        limit: Option<usize>,
    ) -> AppResult<Vec<Document>> {
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));
        let rows: Vec<(String, Json<Fields>)> = sqlx::query_as(
            "SELECT id, fields FROM documents WHERE collection = $1 AND fields -> $2 = $3 \
             ORDER BY id LIMIT $4",
        )
        .bind(collection)
        .bind(field)
        .bind(Json(value))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to query documents"))?;

        Ok(rows
            .into_iter()
            .map(|(id, Json(fields))| Document::new(collection, id, fields))
            .collect())
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
        let mut op = WriteOp::set(collection, id, fields);
        resolve(&mut op, Utc::now());
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;
        apply(&mut conn, op).await
    }

    async fn update_fields(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
        let mut op = WriteOp::update(collection, id, fields);
        resolve(&mut op, Utc::now());
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_error("Failed to acquire connection"))?;
        apply(&mut conn, op).await
    }

    async fn batch_commit(&self, ops: Vec<WriteOp>) -> AppResult<()> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        for mut op in ops {
            resolve(&mut op, now);
            // Dropping `tx` on error rolls the batch back.
            apply(&mut tx, op).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))
    }

    async fn commit_guarded(
        &self,
        filter: FieldMatch,
        build: GuardedWrites,
    ) -> AppResult<Vec<Document>> {
        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        // Held until commit or rollback; covers filters that match no rows yet.
        let lock_key = format!(
            "{}\u{1f}{}\u{1f}{}",
            filter.collection, filter.field, filter.value
        );
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(&lock_key)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to acquire guard lock"))?;

        let rows: Vec<(String, Json<Fields>)> = sqlx::query_as(
            "SELECT id, fields FROM documents WHERE collection = $1 AND fields -> $2 = $3 \
             ORDER BY id FOR UPDATE",
        )
        .bind(&filter.collection)
        .bind(&filter.field)
        .bind(Json(&filter.value))
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("Failed to read guarded documents"))?;

        let matched: Vec<Document> = rows
            .into_iter()
            .map(|(id, Json(fields))| Document::new(filter.collection.as_str(), id, fields))
            .collect();

        for mut op in build(matched.as_slice()) {
            resolve(&mut op, now);
            apply(&mut tx, op).await?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;
        Ok(matched)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(db_error("Health check failed"))
    }
}
