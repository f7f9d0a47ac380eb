//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use schoolhub_core::types::Fields;
use schoolhub_entity::enrollment::EnrolledSubject;
use schoolhub_entity::timetable::Timetable;

/// Plain message response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Minimal user summary returned on login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    /// User id.
    pub id: String,
    /// First-login flag.
    pub is_new: bool,
}

/// Login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Human-readable message.
    pub message: String,
    /// Bearer token.
    pub token: String,
    /// Session expiry.
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: LoginUser,
}

/// Profile response.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    /// Human-readable message.
    pub message: String,
    /// Stored user fields without the credential.
    pub user: Fields,
    /// User id.
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Password reset response.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordResponse {
    /// Human-readable message.
    pub message: String,
    /// User id.
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Enrolled classes response.
#[derive(Debug, Clone, Serialize)]
pub struct ClassesResponse {
    /// Human-readable message.
    pub message: String,
    /// Enrolled subjects with their parent class.
    pub subjects: Vec<EnrolledSubject>,
}

/// Role configuration response.
#[derive(Debug, Clone, Serialize)]
pub struct RoleConfigResponse {
    /// Human-readable message.
    pub message: String,
    /// Configuration fields of the caller's role.
    pub role_config: Fields,
}

/// Timetable response.
#[derive(Debug, Clone, Serialize)]
pub struct TimetableResponse {
    /// Human-readable message.
    pub message: String,
    /// Class id.
    pub class_id: String,
    /// The stored timetable.
    pub timetable: Timetable,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Whether the document store answered its health check.
    pub storage: bool,
}
