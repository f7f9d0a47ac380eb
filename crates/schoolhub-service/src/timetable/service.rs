//! Timetable read and write.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_core::types::path::SEPARATOR;
use schoolhub_database::repositories::TimetableRepository;
use schoolhub_entity::timetable::Timetable;

use crate::context::RequestContext;

/// Reads and replaces class timetables within the caller's school.
#[derive(Debug, Clone)]
pub struct TimetableService {
    repo: Arc<TimetableRepository>,
}

impl TimetableService {
    /// Creates a new timetable service.
    pub fn new(repo: Arc<TimetableRepository>) -> Self {
        Self { repo }
    }

    /// The timetable of a class in the caller's school.
    pub async fn get(&self, ctx: &RequestContext, class_id: Option<&str>) -> AppResult<Timetable> {
        let class_id = require_class_id(class_id)?;
        let school_id = require_school(ctx)?;

        self.repo
            .find(school_id, class_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No timetable for class '{class_id}'")))
    }

    /// Replaces the timetable of a class. Admins and teachers only.
    pub async fn save(
        &self,
        ctx: &RequestContext,
        class_id: Option<&str>,
        schedule: Value,
    ) -> AppResult<()> {
        let can_edit = ctx.role().is_some_and(|role| role.can_edit_timetable());
        if !can_edit {
            return Err(AppError::forbidden(
                "Only admins and teachers can update timetables",
            ));
        }

        let class_id = require_class_id(class_id)?;
        let school_id = require_school(ctx)?;
        if !schedule.is_object() {
            return Err(AppError::bad_request("schedule must be a JSON object"));
        }

        self.repo
            .save(school_id, class_id, schedule, &ctx.user_id)
            .await?;

        info!(user_id = %ctx.user_id, school_id = %school_id, class_id = %class_id, "Timetable updated");
        Ok(())
    }
}

fn require_class_id(class_id: Option<&str>) -> AppResult<&str> {
    let class_id = class_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::bad_request("class_id is required"))?;
    if class_id.contains(SEPARATOR) {
        return Err(AppError::bad_request(format!(
            "class_id must not contain '{SEPARATOR}'"
        )));
    }
    Ok(class_id)
}

fn require_school(ctx: &RequestContext) -> AppResult<&str> {
    ctx.school_id()
        .ok_or_else(|| AppError::bad_request("User is not assigned to a school"))
}
