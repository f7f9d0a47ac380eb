//! Role configuration handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::RoleConfigResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /user-role-config
pub async fn get_role_config(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<RoleConfigResponse>, ApiError> {
    let role_config = state.role_config_service.for_user(&auth).await?;

    Ok(Json(RoleConfigResponse {
        message: "Role config retrieved".to_string(),
        role_config: role_config.config,
    }))
}
