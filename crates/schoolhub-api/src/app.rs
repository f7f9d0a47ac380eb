//! State builder: wires repositories, auth, and services together.

use std::sync::Arc;

use schoolhub_auth::{AuthGuard, SessionCleanup, SessionManager, SessionStore, verifier_from_config};
use schoolhub_core::config::AppConfig;
use schoolhub_core::traits::DocumentStore;
use schoolhub_database::repositories::{
    RoleConfigRepository, SessionRepository, TimetableRepository, UserRepository,
};
use schoolhub_service::{EnrollmentAggregator, RoleConfigService, TimetableService, UserService};

use crate::state::AppState;

/// Builds the shared state over a document store.
pub fn build_state(config: AppConfig, store: Arc<dyn DocumentStore>) -> AppState {
    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(Arc::clone(&store)));
    let session_repo = Arc::new(SessionRepository::new(Arc::clone(&store)));
    let role_config_repo = Arc::new(RoleConfigRepository::new(Arc::clone(&store)));
    let timetable_repo = Arc::new(TimetableRepository::new(Arc::clone(&store)));

    // ── Auth ─────────────────────────────────────────────────────
    let verifier = verifier_from_config(&config.auth);
    let session_store = Arc::new(SessionStore::new(
        Arc::clone(&session_repo),
        config.session.clone(),
    ));
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&session_store),
        Arc::clone(&user_repo),
        verifier,
        config.auth.clone(),
    ));
    let auth_guard = Arc::new(AuthGuard::new(
        Arc::clone(&session_store),
        Arc::clone(&user_repo),
    ));
    let session_cleanup = Arc::new(SessionCleanup::new(Arc::clone(&session_store)));

    // ── Services ─────────────────────────────────────────────────
    let user_service = Arc::new(UserService::new(Arc::clone(&session_manager)));
    let enrollment = Arc::new(EnrollmentAggregator::new(
        Arc::clone(&user_repo),
        Arc::clone(&store),
    ));
    let role_config_service = Arc::new(RoleConfigService::new(role_config_repo));
    let timetable_service = Arc::new(TimetableService::new(timetable_repo));

    AppState {
        config: Arc::new(config),
        store,
        auth_guard,
        session_manager,
        session_cleanup,
        user_service,
        enrollment,
        role_config_service,
        timetable_service,
    }
}
