//! Enrolled classes handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::ClassesResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /classes
pub async fn list_classes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ClassesResponse>, ApiError> {
    let view = state.enrollment.enrolled_subjects(&auth.user_id).await?;

    Ok(Json(ClassesResponse {
        message: "Classes retrieved".to_string(),
        subjects: view.subjects,
    }))
}
