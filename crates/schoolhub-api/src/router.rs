//! Route definitions for the SchoolHub HTTP API.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(school_routes())
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login and logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
}

/// Profile and password self-service
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(handlers::user::get_profile))
        .route("/reset-password", post(handlers::user::reset_password))
        .route("/user-role-config", get(handlers::role_config::get_role_config))
}

/// Enrolled classes and timetables
fn school_routes() -> Router<AppState> {
    Router::new()
        .route("/classes", get(handlers::classes::list_classes))
        .route(
            "/timetable",
            get(handlers::timetable::get_timetable).post(handlers::timetable::save_timetable),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
}
