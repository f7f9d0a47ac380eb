//! Session repository implementation.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use tracing::warn;

use schoolhub_core::result::AppResult;
use schoolhub_core::traits::{DocumentStore, FieldMatch, WriteOp};
use schoolhub_core::types::{Document, Fields, server_timestamp};
use schoolhub_entity::session::model::token_hint;
use schoolhub_entity::session::{SESSIONS_COLLECTION, Session};

/// Repository for session reads and lifecycle writes.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    store: Arc<dyn DocumentStore>,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Find a session by its token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        self.store
            .get_document(SESSIONS_COLLECTION, token)
            .await?
            .map(|doc| Session::from_document(&doc))
            .transpose()
    }

    /// Opens a new session for `user_id` and deactivates every session the
    /// user still has marked active, as one guarded commit.
    ///
    /// Returns the number of sessions deactivated.
    pub async fn replace_active(
        &self,
        user_id: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<usize> {
        let create = Self::create_op(token, user_id, expires_at);
        let matched = self
            .store
            .commit_guarded(
                FieldMatch::new(
                    SESSIONS_COLLECTION,
                    "user_id",
                    Value::String(user_id.to_string()),
                ),
                Box::new(move |sessions: &[Document]| {
                    let mut ops: Vec<WriteOp> = sessions
                        .iter()
                        .filter(|doc| is_marked_active(doc))
                        .map(|doc| Self::deactivate_op(&doc.id))
                        .collect();
                    ops.push(create);
                    ops
                }),
            )
            .await?;

        Ok(matched.iter().filter(|doc| is_marked_active(doc)).count())
    }

    /// Active sessions whose expiry lies before `now`. Sessions that no
    /// longer decode are logged and skipped.
    pub async fn find_expired(&self, now: DateTime<Utc>) -> AppResult<Vec<Session>> {
        let docs = self
            .store
            .query_equals(SESSIONS_COLLECTION, "active", &Value::Bool(true), None)
            .await?;

        Ok(docs
            .iter()
            .filter_map(|doc| match Session::from_document(doc) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(token = %token_hint(&doc.id), error = %e, "Skipping malformed session");
                    None
                }
            })
            .filter(|s| s.is_expired_at(now))
            .collect())
    }

    /// Flip a session inactive, stamping the deactivation time.
    pub async fn deactivate(&self, token: &str) -> AppResult<()> {
        self.store.batch_commit(vec![Self::deactivate_op(token)]).await
    }

    /// Apply session writes atomically.
    pub async fn commit(&self, ops: Vec<WriteOp>) -> AppResult<()> {
        self.store.batch_commit(ops).await
    }

    /// Write that flips a session inactive.
    pub fn deactivate_op(token: &str) -> WriteOp {
        let mut fields = Fields::new();
        fields.insert("active".into(), Value::Bool(false));
        fields.insert("deactivated_at".into(), server_timestamp());
        WriteOp::update(SESSIONS_COLLECTION, token, fields)
    }

    /// Write that creates a new active session.
    pub fn create_op(token: &str, user_id: &str, expires_at: DateTime<Utc>) -> WriteOp {
        let mut fields = Fields::new();
        fields.insert("token".into(), Value::String(token.to_string()));
        fields.insert("user_id".into(), Value::String(user_id.to_string()));
        fields.insert("created_at".into(), server_timestamp());
        fields.insert(
            "expires_at".into(),
            Value::String(expires_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        fields.insert("active".into(), Value::Bool(true));
        WriteOp::set(SESSIONS_COLLECTION, token, fields)
    }
}

fn is_marked_active(doc: &Document) -> bool {
    doc.get("active") == Some(&Value::Bool(true))
}
