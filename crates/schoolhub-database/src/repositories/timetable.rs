//! Timetable repository.

use std::sync::Arc;

use serde_json::Value;

use schoolhub_core::result::AppResult;
use schoolhub_core::traits::DocumentStore;
use schoolhub_core::types::{Fields, server_timestamp};
use schoolhub_entity::timetable::{CURRENT_SCHEDULE_ID, Timetable, timetable_collection};

/// Stores one timetable document per class.
#[derive(Debug, Clone)]
pub struct TimetableRepository {
    store: Arc<dyn DocumentStore>,
}

impl TimetableRepository {
    /// Create a new timetable repository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Find the current timetable of a class.
    pub async fn find(&self, school_id: &str, class_id: &str) -> AppResult<Option<Timetable>> {
        self.store
            .get_document(&timetable_collection(school_id, class_id), CURRENT_SCHEDULE_ID)
            .await?
            .map(|doc| doc.decode::<Timetable>())
            .transpose()
    }

    /// Replace the timetable of a class.
    pub async fn save(
        &self,
        school_id: &str,
        class_id: &str,
        schedule: Value,
        updated_by: &str,
    ) -> AppResult<()> {
        let mut fields = Fields::new();
        fields.insert("schedule".into(), schedule);
        fields.insert("updated_by".into(), Value::String(updated_by.to_string()));
        fields.insert("updated_at".into(), server_timestamp());

        self.store
            .set_document(
                &timetable_collection(school_id, class_id),
                CURRENT_SCHEDULE_ID,
                fields,
            )
            .await
    }
}
