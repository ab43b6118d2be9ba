//! Course catalog endpoints

use serde::Serialize;
use tracing::instrument;

use campushub_domain::{Course, ScheduleEntry};

use crate::api::{ApiClient, ApiError, QueryPairs};

/// Filter for the course listing
///
/// Absent or empty fields are omitted from the query string entirely.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub department: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub limit: Option<u32>,
    pub after: Option<String>,
}

impl CourseFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("department", self.department.as_deref())
            .push_opt("academic_year", self.academic_year.as_deref())
            .push_opt("semester", self.semester.as_deref())
            .push_opt_display("year", self.year)
            .push_opt_display("limit", self.limit)
            .push_opt("after", self.after.as_deref());
        query
    }
}

/// Payload for creating a course
#[derive(Debug, Clone, Serialize)]
pub struct NewCourse {
    pub code: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
}

/// Partial update of a course
#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
}

impl ApiClient {
    /// List catalog courses matching `filter`.
    #[instrument(skip(self, filter))]
    pub async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>, ApiError> {
        self.get_with("/courses", filter.to_query()).await
    }

    /// Fetch one course.
    pub async fn get_course(&self, course_id: &str) -> Result<Course, ApiError> {
        self.get(&format!("/courses/{}", course_id)).await
    }

    /// Create a catalog course.
    pub async fn create_course(&self, course: &NewCourse) -> Result<Course, ApiError> {
        self.post("/courses", course).await
    }

    /// Update a catalog course.
    pub async fn update_course(
        &self,
        course_id: &str,
        update: &CourseUpdate,
    ) -> Result<Course, ApiError> {
        self.put(&format!("/courses/{}", course_id), update).await
    }

    /// Delete a catalog course.
    pub async fn delete_course(&self, course_id: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.delete(&format!("/courses/{}", course_id)).await?;
        Ok(())
    }

    /// Timetable slots where a course is taught.
    pub async fn course_schedule(&self, course_id: &str) -> Result<Vec<ScheduleEntry>, ApiError> {
        self.get(&format!("/courses/{}/schedule", course_id)).await
    }
}
