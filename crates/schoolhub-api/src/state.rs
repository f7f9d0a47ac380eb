//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use schoolhub_auth::{AuthGuard, SessionCleanup, SessionManager};
use schoolhub_core::config::AppConfig;
use schoolhub_core::traits::DocumentStore;
use schoolhub_service::{
    EnrollmentAggregator, RoleConfigService, TimetableService, UserService,
};

/// Shared application state, cheaply cloneable.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// The document store, used for health reporting.
    pub store: Arc<dyn DocumentStore>,
    /// Bearer token validation.
    pub auth_guard: Arc<AuthGuard>,
    /// Login, logout, and password reset.
    pub session_manager: Arc<SessionManager>,
    /// Expired session sweeper.
    pub session_cleanup: Arc<SessionCleanup>,
    /// Profile and password self-service.
    pub user_service: Arc<UserService>,
    /// Enrolled-subject resolution.
    pub enrollment: Arc<EnrollmentAggregator>,
    /// Role configuration lookup.
    pub role_config_service: Arc<RoleConfigService>,
    /// Class timetables.
    pub timetable_service: Arc<TimetableService>,
}
