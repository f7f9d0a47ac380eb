//! Timetable documents, one per class.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed document id of a class's timetable.
pub const CURRENT_SCHEDULE_ID: &str = "current_schedule";

/// Returns the collection holding the timetable of a class.
pub fn timetable_collection(school_id: &str, class_id: &str) -> String {
    format!("school/{school_id}/classes/{class_id}/timetable")
}

/// The stored timetable of a class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    /// Free-form schedule body.
    pub schedule: Value,
    /// User who last wrote the timetable.
    #[serde(default)]
    pub updated_by: Option<String>,
    /// Last write time, resolved by the store.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
