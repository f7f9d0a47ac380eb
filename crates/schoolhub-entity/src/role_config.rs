//! Per-role configuration blobs.

use serde::{Deserialize, Serialize};

use schoolhub_core::types::{Document, Fields};

/// Collection holding role configuration, keyed by role tag.
pub const ROLE_CONFIGS_COLLECTION: &str = "role_configs";

/// Read-only configuration for one role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    /// The role tag this configuration belongs to.
    pub role: String,
    /// Opaque configuration fields.
    pub config: Fields,
}

impl From<Document> for RoleConfig {
    fn from(doc: Document) -> Self {
        Self {
            role: doc.id,
            config: doc.fields,
        }
    }
}
