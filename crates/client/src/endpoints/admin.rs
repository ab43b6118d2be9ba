//! Administration endpoints
//!
//! User, class, and attendance management for admin accounts. The
//! backend enforces the role; the client merely forwards requests.

use serde::Serialize;
use tracing::instrument;

use campushub_domain::{AttendanceRecord, AttendanceStatus, SchoolClass, UserAccount};

use crate::api::{ApiClient, ApiError, QueryPairs};

/// Filter for the admin user listing
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<String>,
    pub department: Option<String>,
    pub search: Option<String>,
    pub active: Option<bool>,
    pub limit: Option<u32>,
    pub after: Option<String>,
}

impl UserFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("role", self.role.as_deref())
            .push_opt("department", self.department.as_deref())
            .push_opt("search", self.search.as_deref())
            .push_opt_display("active", self.active)
            .push_opt_display("limit", self.limit)
            .push_opt("after", self.after.as_deref());
        query
    }
}

/// Filter for the admin class listing
#[derive(Debug, Clone, Default)]
pub struct ClassFilter {
    pub academic_year: Option<String>,
    pub grade_level: Option<String>,
    pub teacher_id: Option<String>,
    pub limit: Option<u32>,
    pub after: Option<String>,
}

impl ClassFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("academic_year", self.academic_year.as_deref())
            .push_opt("grade_level", self.grade_level.as_deref())
            .push_opt("teacher_id", self.teacher_id.as_deref())
            .push_opt_display("limit", self.limit)
            .push_opt("after", self.after.as_deref());
        query
    }
}

/// Payload for creating a user account
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial update of a user account
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Payload for creating a class
#[derive(Debug, Clone, Serialize)]
pub struct NewClass {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
}

/// Partial update of a class
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
}

#[derive(Debug, Serialize)]
struct AssignTeacherRequest<'a> {
    teacher_id: &'a str,
}

/// One row of an attendance sheet submitted by an admin
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEntry {
    pub student_id: String,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ApiClient {
    /// List user accounts matching `filter`.
    #[instrument(skip(self, filter))]
    pub async fn admin_list_users(&self, filter: &UserFilter) -> Result<Vec<UserAccount>, ApiError> {
        self.get_with("/admin/users", filter.to_query()).await
    }

    /// Fetch a single user account.
    pub async fn admin_get_user(&self, user_id: &str) -> Result<UserAccount, ApiError> {
        self.get(&format!("/admin/users/{}", user_id)).await
    }

    /// Create a user account.
    pub async fn admin_create_user(&self, user: &NewUser) -> Result<UserAccount, ApiError> {
        self.post("/admin/users", user).await
    }

    /// Update a user account.
    pub async fn admin_update_user(
        &self,
        user_id: &str,
        update: &UserUpdate,
    ) -> Result<UserAccount, ApiError> {
        self.put(&format!("/admin/users/{}", user_id), update).await
    }

    /// Delete a user account.
    pub async fn admin_delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.delete(&format!("/admin/users/{}", user_id)).await?;
        Ok(())
    }

    /// Trigger a password reset for a user.
    pub async fn admin_reset_user_password(&self, user_id: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.post_empty(&format!("/admin/users/{}/reset-password", user_id)).await?;
        Ok(())
    }

    /// List classes matching `filter`.
    #[instrument(skip(self, filter))]
    pub async fn admin_list_classes(
        &self,
        filter: &ClassFilter,
    ) -> Result<Vec<SchoolClass>, ApiError> {
        self.get_with("/admin/classes", filter.to_query()).await
    }

    /// Create a class.
    ///
    /// Failures surface as errors like every other mutation; there is
    /// no local fallback that fabricates a success.
    pub async fn admin_create_class(&self, class: &NewClass) -> Result<SchoolClass, ApiError> {
        self.post("/admin/classes", class).await
    }

    /// Update a class.
    pub async fn admin_update_class(
        &self,
        class_id: &str,
        update: &ClassUpdate,
    ) -> Result<SchoolClass, ApiError> {
        self.put(&format!("/admin/classes/{}", class_id), update).await
    }

    /// Delete a class.
    pub async fn admin_delete_class(&self, class_id: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.delete(&format!("/admin/classes/{}", class_id)).await?;
        Ok(())
    }

    /// Assign a homeroom teacher to a class.
    pub async fn admin_assign_class_teacher(
        &self,
        class_id: &str,
        teacher_id: &str,
    ) -> Result<SchoolClass, ApiError> {
        self.post(
            &format!("/admin/classes/{}/teacher", class_id),
            &AssignTeacherRequest { teacher_id },
        )
        .await
    }

    /// Attendance sheet for a class on one date (ISO `YYYY-MM-DD`).
    pub async fn admin_class_attendance(
        &self,
        class_id: &str,
        date: &str,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let mut query = QueryPairs::new();
        query.push("date", date);
        self.get_with(&format!("/admin/classes/{}/attendance", class_id), query).await
    }

    /// School-wide attendance summary; shape varies by term so the raw
    /// payload is returned.
    pub async fn admin_attendance_summary(
        &self,
        academic_year: Option<&str>,
        semester: Option<&str>,
    ) -> Result<serde_json::Value, ApiError> {
        let mut query = QueryPairs::new();
        query.push_opt("academic_year", academic_year).push_opt("semester", semester);
        self.get_with("/admin/attendance/summary", query).await
    }
}
