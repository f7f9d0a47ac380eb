//! Bearer token validation for authenticated requests.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::types::Document;
use schoolhub_database::repositories::UserRepository;
use schoolhub_entity::session::model::token_hint;
use schoolhub_entity::user::User;

use crate::session::SessionStore;
use crate::token::bearer_token;

/// The identity attached to a request that passed the guard.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Id of the owning user.
    pub user_id: String,
    /// Decoded user.
    pub user: User,
    /// The stored user document.
    pub record: Document,
}

/// Validates bearer tokens against the session store.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    session_store: Arc<SessionStore>,
    user_repo: Arc<UserRepository>,
}

impl AuthGuard {
    /// Creates a new guard.
    pub fn new(session_store: Arc<SessionStore>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            session_store,
            user_repo,
        }
    }

    /// Checks an `Authorization` header value, stopping at the first failure:
    ///
    /// - missing or non-bearer header: `Unauthorized`
    /// - unknown token: `Forbidden`
    /// - inactive session: `Forbidden`
    /// - expired session: flipped inactive, then `Forbidden`
    /// - owning user missing: `NotFound`
    pub async fn authenticate(&self, header: Option<&str>) -> AppResult<AuthenticatedUser> {
        let token = header
            .and_then(bearer_token)
            .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;

        let session = self
            .session_store
            .find(token)
            .await?
            .ok_or_else(|| AppError::forbidden("Invalid token"))?;

        if !session.active {
            return Err(AppError::forbidden("Session invalidated"));
        }

        if session.is_expired_at(Utc::now()) {
            if let Err(e) = self.session_store.deactivate(token).await {
                warn!(
                    token = %token_hint(token),
                    error = %e,
                    "Failed to deactivate expired session"
                );
            }
            return Err(AppError::forbidden("Session expired"));
        }

        let record = self
            .user_repo
            .find_document(&session.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let user = User::from_document(&record)?;

        debug!(user_id = %user.id, "Request authenticated");

        Ok(AuthenticatedUser {
            user_id: user.id.clone(),
            user,
            record,
        })
    }
}
