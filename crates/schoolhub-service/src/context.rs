//! Request context carrying the authenticated user.

use schoolhub_auth::AuthenticatedUser;
use schoolhub_core::types::Document;
use schoolhub_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built from the guard's result and passed into service methods so every
/// operation knows who is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's id.
    pub user_id: String,
    /// The decoded user.
    pub user: User,
    /// The stored user document, as loaded by the guard.
    pub record: Document,
}

impl RequestContext {
    /// The user's role, if set.
    pub fn role(&self) -> Option<&UserRole> {
        self.user.role.as_ref()
    }

    /// The user's school, if set.
    pub fn school_id(&self) -> Option<&str> {
        self.user.school_id.as_deref()
    }
}

impl From<AuthenticatedUser> for RequestContext {
    fn from(auth: AuthenticatedUser) -> Self {
        Self {
            user_id: auth.user_id,
            user: auth.user,
            record: auth.record,
        }
    }
}
