//! User self-service operations: profile viewing and password reset.

use std::sync::Arc;

use schoolhub_auth::SessionManager;
use schoolhub_core::result::AppResult;
use schoolhub_core::types::Fields;
use schoolhub_entity::user::model::public_fields;

use crate::context::RequestContext;

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    session_manager: Arc<SessionManager>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(session_manager: Arc<SessionManager>) -> Self {
        Self { session_manager }
    }

    /// The current user's stored fields, without the credential.
    pub fn profile(&self, ctx: &RequestContext) -> Fields {
        public_fields(&ctx.record)
    }

    /// Replaces the current user's password.
    pub async fn reset_password(&self, ctx: &RequestContext, new_password: &str) -> AppResult<()> {
        self.session_manager
            .reset_password(&ctx.user_id, new_password)
            .await
    }
}
