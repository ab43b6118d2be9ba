//! Timetable endpoints

use serde::Serialize;

use campushub_domain::ScheduleEntry;

use crate::api::{ApiClient, ApiError};

/// Payload for creating a timetable slot
#[derive(Debug, Clone, Serialize)]
pub struct NewScheduleEntry {
    pub class_id: String,
    pub course_id: String,
    /// ISO weekday, 1 = Monday
    pub weekday: u8,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// Partial update of a timetable slot
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl ApiClient {
    /// Weekly timetable of a class.
    pub async fn class_schedule(&self, class_id: &str) -> Result<Vec<ScheduleEntry>, ApiError> {
        self.get(&format!("/schedule/classes/{}", class_id)).await
    }

    /// The signed-in user's own timetable (teacher or student).
    pub async fn my_schedule(&self) -> Result<Vec<ScheduleEntry>, ApiError> {
        self.get("/schedule/my").await
    }

    /// Create a timetable slot.
    pub async fn create_schedule_entry(
        &self,
        entry: &NewScheduleEntry,
    ) -> Result<ScheduleEntry, ApiError> {
        self.post("/schedule", entry).await
    }

    /// Update a timetable slot.
    pub async fn update_schedule_entry(
        &self,
        entry_id: &str,
        update: &ScheduleEntryUpdate,
    ) -> Result<ScheduleEntry, ApiError> {
        self.put(&format!("/schedule/{}", entry_id), update).await
    }

    /// Delete a timetable slot.
    pub async fn delete_schedule_entry(&self, entry_id: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.delete(&format!("/schedule/{}", entry_id)).await?;
        Ok(())
    }
}
