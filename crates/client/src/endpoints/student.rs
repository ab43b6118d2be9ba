//! Student endpoints
//!
//! Attendance and assignments for the signed-in student.

use serde::Serialize;

use campushub_domain::{Assignment, AttendanceRecord, Submission};

use crate::api::{ApiClient, ApiError, QueryPairs};

/// Date-bounded filter shared by student listings
#[derive(Debug, Clone, Default)]
pub struct StudentAttendanceFilter {
    /// Inclusive ISO date bound (`YYYY-MM-DD`)
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: Option<String>,
}

impl StudentAttendanceFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("from", self.from.as_deref())
            .push_opt("to", self.to.as_deref())
            .push_opt("status", self.status.as_deref());
        query
    }
}

/// Filter for the student's assignment listing
#[derive(Debug, Clone, Default)]
pub struct StudentAssignmentFilter {
    /// "open", "submitted", or "graded"
    pub state: Option<String>,
    pub course_id: Option<String>,
    pub limit: Option<u32>,
}

impl StudentAssignmentFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("state", self.state.as_deref())
            .push_opt("course_id", self.course_id.as_deref())
            .push_opt_display("limit", self.limit);
        query
    }
}

#[derive(Debug, Serialize)]
struct SubmitAssignmentRequest<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment_url: Option<&'a str>,
}

impl ApiClient {
    /// The signed-in student's attendance records.
    pub async fn student_attendance(
        &self,
        filter: &StudentAttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.get_with("/student/attendance", filter.to_query()).await
    }

    /// Aggregated attendance counts per status; shape varies by term.
    pub async fn student_attendance_summary(&self) -> Result<serde_json::Value, ApiError> {
        self.get("/student/attendance/summary").await
    }

    /// Assignments visible to the signed-in student.
    pub async fn student_assignments(
        &self,
        filter: &StudentAssignmentFilter,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.get_with("/student/assignments", filter.to_query()).await
    }

    /// One assignment with full description.
    pub async fn student_assignment(&self, assignment_id: &str) -> Result<Assignment, ApiError> {
        self.get(&format!("/student/assignments/{}", assignment_id)).await
    }

    /// Submit work for an assignment.
    pub async fn student_submit_assignment(
        &self,
        assignment_id: &str,
        content: &str,
        attachment_url: Option<&str>,
    ) -> Result<Submission, ApiError> {
        self.post(
            &format!("/student/assignments/{}/submit", assignment_id),
            &SubmitAssignmentRequest { content, attachment_url },
        )
        .await
    }

    /// The signed-in student's submissions.
    pub async fn student_submissions(&self) -> Result<Vec<Submission>, ApiError> {
        self.get("/student/submissions").await
    }
}
