//! Request DTOs with validation.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email, matched exactly.
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password reset request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// The new password.
    #[serde(default, rename = "newPassword")]
    #[validate(length(min = 1, message = "newPassword is required"))]
    pub new_password: String,
}

/// Timetable query string.
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableQuery {
    /// Class whose timetable is requested.
    pub class_id: Option<String>,
}

/// Timetable write body.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveTimetableRequest {
    /// Class whose timetable is replaced.
    pub class_id: Option<String>,
    /// The new schedule.
    #[serde(default)]
    pub schedule: Value,
}
