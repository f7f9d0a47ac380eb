//! Timetable handlers.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::{SaveTimetableRequest, TimetableQuery};
use crate::dto::response::{MessageResponse, TimetableResponse};
use crate::error::ApiError;
use crate::extractors::{AppJson, AuthUser};
use crate::state::AppState;

/// GET /timetable?class_id=...
pub async fn get_timetable(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TimetableQuery>,
) -> Result<Json<TimetableResponse>, ApiError> {
    let class_id = query.class_id.as_deref();
    let timetable = state.timetable_service.get(&auth, class_id).await?;

    Ok(Json(TimetableResponse {
        message: "Timetable retrieved".to_string(),
        class_id: class_id.unwrap_or_default().trim().to_string(),
        timetable,
    }))
}

/// POST /timetable
pub async fn save_timetable(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<SaveTimetableRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .timetable_service
        .save(&auth, req.class_id.as_deref(), req.schedule)
        .await?;

    Ok(Json(MessageResponse::new("Timetable saved")))
}
