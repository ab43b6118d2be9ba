//! Parent endpoints
//!
//! Read-only views over a parent's linked children: attendance,
//! results, assignments, schedule, and invoices.

use campushub_domain::{
    Assignment, AttendanceRecord, Child, ExamResult, Invoice, ScheduleEntry,
};

use crate::api::{ApiClient, ApiError, QueryPairs};

use super::student::StudentAttendanceFilter;

impl ApiClient {
    /// Children linked to the signed-in parent.
    pub async fn parent_children(&self) -> Result<Vec<Child>, ApiError> {
        self.get("/parent/children").await
    }

    /// Attendance records for one child.
    pub async fn parent_child_attendance(
        &self,
        child_id: &str,
        filter: &StudentAttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let mut query = QueryPairs::new();
        query
            .push_opt("from", filter.from.as_deref())
            .push_opt("to", filter.to.as_deref())
            .push_opt("status", filter.status.as_deref());
        self.get_with(&format!("/parent/children/{}/attendance", child_id), query).await
    }

    /// Published results for one child.
    pub async fn parent_child_results(
        &self,
        child_id: &str,
        academic_year: Option<&str>,
        semester: Option<&str>,
    ) -> Result<Vec<ExamResult>, ApiError> {
        let mut query = QueryPairs::new();
        query.push_opt("academic_year", academic_year).push_opt("semester", semester);
        self.get_with(&format!("/parent/children/{}/results", child_id), query).await
    }

    /// Assignments currently issued to one child.
    pub async fn parent_child_assignments(
        &self,
        child_id: &str,
    ) -> Result<Vec<Assignment>, ApiError> {
        self.get(&format!("/parent/children/{}/assignments", child_id)).await
    }

    /// Weekly timetable of one child's class.
    pub async fn parent_child_schedule(
        &self,
        child_id: &str,
    ) -> Result<Vec<ScheduleEntry>, ApiError> {
        self.get(&format!("/parent/children/{}/schedule", child_id)).await
    }

    /// Invoices issued for one child.
    pub async fn parent_child_invoices(&self, child_id: &str) -> Result<Vec<Invoice>, ApiError> {
        self.get(&format!("/parent/children/{}/invoices", child_id)).await
    }
}
