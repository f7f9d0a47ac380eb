//! Role configuration repository.

use std::sync::Arc;

use schoolhub_core::result::AppResult;
use schoolhub_core::traits::DocumentStore;
use schoolhub_entity::role_config::{ROLE_CONFIGS_COLLECTION, RoleConfig};

/// Read-only access to per-role configuration.
#[derive(Debug, Clone)]
pub struct RoleConfigRepository {
    store: Arc<dyn DocumentStore>,
}

impl RoleConfigRepository {
    /// Create a new role configuration repository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Find the configuration of a role.
    pub async fn find_by_role(&self, role: &str) -> AppResult<Option<RoleConfig>> {
        Ok(self
            .store
            .get_document(ROLE_CONFIGS_COLLECTION, role)
            .await?
            .map(RoleConfig::from))
    }
}
