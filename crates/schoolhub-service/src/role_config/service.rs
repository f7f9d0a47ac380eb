//! Role configuration service.

use std::sync::Arc;

use tracing::debug;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_database::repositories::RoleConfigRepository;
use schoolhub_entity::role_config::RoleConfig;

use crate::context::RequestContext;

/// Looks up the configuration attached to the caller's role.
#[derive(Debug, Clone)]
pub struct RoleConfigService {
    repo: Arc<RoleConfigRepository>,
}

impl RoleConfigService {
    /// Creates a new role config service.
    pub fn new(repo: Arc<RoleConfigRepository>) -> Self {
        Self { repo }
    }

    /// The configuration for the current user's role.
    pub async fn for_user(&self, ctx: &RequestContext) -> AppResult<RoleConfig> {
        let role = ctx
            .role()
            .ok_or_else(|| AppError::not_found("User role not set"))?;

        debug!(user_id = %ctx.user_id, role = %role, "Loading role config");

        self.repo
            .find_by_role(role.as_str())
            .await?
            .ok_or_else(|| AppError::not_found(format!("No configuration for role '{role}'")))
    }
}
