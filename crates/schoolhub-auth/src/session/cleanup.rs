//! Expired session cleanup.

use std::sync::Arc;

use tracing::{error, info};

use schoolhub_core::error::AppError;

use super::store::SessionStore;

/// Deactivates sessions whose expiry has passed. Sessions are kept as an
/// audit trail and never deleted.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    session_store: Arc<SessionStore>,
}

impl SessionCleanup {
    /// Creates a new session cleanup handler.
    pub fn new(session_store: Arc<SessionStore>) -> Self {
        Self { session_store }
    }

    /// Runs one cleanup cycle.
    ///
    /// Returns the number of sessions deactivated.
    pub async fn run_cleanup(&self) -> Result<usize, AppError> {
        let expired = self.session_store.find_expired().await?;

        if expired.is_empty() {
            return Ok(0);
        }

        info!(count = expired.len(), "Found expired sessions to clean up");

        if let Err(e) = self.session_store.deactivate_all(&expired).await {
            error!(error = %e, "Failed to deactivate expired sessions");
            return Err(e);
        }

        info!(cleaned = expired.len(), "Session cleanup completed");
        Ok(expired.len())
    }
}
