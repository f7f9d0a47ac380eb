//! Session storage operations wrapping the session repository.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use schoolhub_core::config::SessionConfig;
use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_database::repositories::SessionRepository;
use schoolhub_entity::session::Session;

use crate::token::generate_session_token;

/// A session written by [`SessionStore::replace_active`].
#[derive(Debug, Clone)]
pub struct OpenedSession {
    /// The new bearer token.
    pub token: String,
    /// Absolute expiry of the new session.
    pub expires_at: DateTime<Utc>,
    /// Number of previously active sessions that were deactivated.
    pub replaced: usize,
}

/// Creates, invalidates, and queries sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    repo: Arc<SessionRepository>,
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(repo: Arc<SessionRepository>, config: SessionConfig) -> Self {
        Self { repo, config }
    }

    /// Opens a new session for `user_id`, deactivating every session the
    /// user still has marked active in the same guarded commit.
    pub async fn replace_active(&self, user_id: &str) -> AppResult<OpenedSession> {
        let expires_at = self.expiry_from(Utc::now())?;
        let token = generate_session_token();

        let replaced = self.repo.replace_active(user_id, &token, expires_at).await?;
        debug!(user_id = %user_id, replaced, "Session batch committed");

        Ok(OpenedSession {
            token,
            expires_at,
            replaced,
        })
    }

    /// Absolute expiry of a session opened at `now`.
    fn expiry_from(&self, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        i64::try_from(self.config.ttl_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "session.ttl_hours = {} is out of range",
                    self.config.ttl_hours
                ))
            })
    }

    /// Finds a session by token.
    pub async fn find(&self, token: &str) -> AppResult<Option<Session>> {
        self.repo.find_by_token(token).await
    }

    /// Marks a session inactive.
    pub async fn deactivate(&self, token: &str) -> AppResult<()> {
        self.repo.deactivate(token).await
    }

    /// Marks several sessions inactive in one commit.
    pub async fn deactivate_all(&self, sessions: &[Session]) -> AppResult<()> {
        if sessions.is_empty() {
            return Ok(());
        }
        let ops = sessions
            .iter()
            .map(|session| SessionRepository::deactivate_op(&session.token))
            .collect();
        self.repo.commit(ops).await
    }

    /// Active sessions whose expiry has passed.
    pub async fn find_expired(&self) -> AppResult<Vec<Session>> {
        self.repo.find_expired(Utc::now()).await
    }
}
