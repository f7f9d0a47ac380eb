//! User self-service handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use crate::dto::request::ResetPasswordRequest;
use crate::dto::response::{ProfileResponse, ResetPasswordResponse};
use crate::error::ApiError;
use crate::extractors::{AppJson, AuthUser};
use crate::state::AppState;

/// GET /profile
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Profile retrieved".to_string(),
        user: state.user_service.profile(&auth),
        user_id: auth.user_id.clone(),
    })
}

/// POST /reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> Result<Json<ResetPasswordResponse>, ApiError> {
    req.validate()?;

    state
        .user_service
        .reset_password(&auth, &req.new_password)
        .await?;

    Ok(Json(ResetPasswordResponse {
        message: "Password updated successfully".to_string(),
        user_id: auth.user_id.clone(),
    }))
}
