//! Auth handlers: login and logout.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use validator::Validate;

use schoolhub_auth::token::bearer_token;

use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, LoginUser, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AppJson;
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    req.validate()?;

    let result = state.session_manager.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: result.token,
        expires_at: result.expires_at,
        user: LoginUser {
            id: result.user_id,
            is_new: result.is_new,
        },
    }))
}

/// POST /logout
///
/// Always succeeds, whatever the state of the presented token.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<MessageResponse> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    state.session_manager.logout(token).await;

    Json(MessageResponse::new("Logged out successfully"))
}
