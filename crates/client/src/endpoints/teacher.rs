//! Teacher endpoints
//!
//! Classes, assignments, grading, and attendance for teacher accounts.

use serde::Serialize;
use tracing::instrument;

use campushub_domain::{Assignment, AttendanceRecord, SchoolClass, Submission, UserAccount};

use crate::api::{ApiClient, ApiError, QueryPairs};

use super::admin::AttendanceEntry;

/// Payload for creating an assignment
#[derive(Debug, Clone, Serialize)]
pub struct NewAssignment {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    pub published: bool,
}

/// Partial update of an assignment
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

#[derive(Debug, Serialize)]
struct GradeRequest<'a> {
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedback: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AttendanceSheet<'a> {
    date: &'a str,
    entries: &'a [AttendanceEntry],
}

impl ApiClient {
    /// Classes the signed-in teacher teaches.
    pub async fn teacher_classes(&self) -> Result<Vec<SchoolClass>, ApiError> {
        self.get("/teacher/classes").await
    }

    /// Roster of one of the teacher's classes.
    pub async fn teacher_class_students(
        &self,
        class_id: &str,
    ) -> Result<Vec<UserAccount>, ApiError> {
        self.get(&format!("/teacher/classes/{}/students", class_id)).await
    }

    /// Attendance sheet for one date (ISO `YYYY-MM-DD`).
    pub async fn teacher_class_attendance(
        &self,
        class_id: &str,
        date: &str,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let mut query = QueryPairs::new();
        query.push("date", date);
        self.get_with(&format!("/teacher/classes/{}/attendance", class_id), query).await
    }

    /// Record a full attendance sheet for one date.
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub async fn teacher_record_attendance(
        &self,
        class_id: &str,
        date: &str,
        entries: &[AttendanceEntry],
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.post(
            &format!("/teacher/classes/{}/attendance", class_id),
            &AttendanceSheet { date, entries },
        )
        .await
    }

    /// Assignments issued to a class.
    pub async fn teacher_class_assignments(
        &self,
        class_id: &str,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.get(&format!("/teacher/classes/{}/assignments", class_id)).await
    }

    /// Issue an assignment to a class.
    pub async fn teacher_create_assignment(
        &self,
        class_id: &str,
        assignment: &NewAssignment,
    ) -> Result<Assignment, ApiError> {
        self.post(&format!("/teacher/classes/{}/assignments", class_id), assignment).await
    }

    /// Update an assignment.
    pub async fn teacher_update_assignment(
        &self,
        assignment_id: &str,
        update: &AssignmentUpdate,
    ) -> Result<Assignment, ApiError> {
        self.put(&format!("/teacher/assignments/{}", assignment_id), update).await
    }

    /// Delete an assignment.
    pub async fn teacher_delete_assignment(&self, assignment_id: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.delete(&format!("/teacher/assignments/{}", assignment_id)).await?;
        Ok(())
    }

    /// Submissions received for an assignment.
    pub async fn teacher_assignment_submissions(
        &self,
        assignment_id: &str,
    ) -> Result<Vec<Submission>, ApiError> {
        self.get(&format!("/teacher/assignments/{}/submissions", assignment_id)).await
    }

    /// Grade one submission.
    #[instrument(skip(self, feedback))]
    pub async fn teacher_grade_submission(
        &self,
        submission_id: &str,
        score: f64,
        feedback: Option<&str>,
    ) -> Result<Submission, ApiError> {
        self.post(
            &format!("/teacher/submissions/{}/grade", submission_id),
            &GradeRequest { score, feedback },
        )
        .await
    }
}
