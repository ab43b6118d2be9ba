//! Common data types used throughout the client SDK
//!
//! These mirror the backend's JSON payloads. The backend does not
//! guarantee a schema beyond the response envelope, so list/detail
//! types keep optional fields optional and tolerate unknown fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access/refresh token pair issued by the backend
///
/// Always stored and replaced as a unit; the vault never holds one
/// token without the other. Expiry is not tracked client-side; an
/// expired access token is discovered reactively via a 401 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

/// Device metadata attached to every outgoing request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Generated once per install and persisted; never regenerated
    /// unless storage is cleared externally.
    pub device_id: String,
    pub platform: String,
    pub os_version: String,
    pub app_version: String,
    pub model: String,
    pub brand: String,
}

/// Role a user account holds on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
    Parent,
    Staff,
}

/// User account summary as returned by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Authenticated user's own profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// A class (homeroom/section) managed by the school
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub student_count: Option<u32>,
}

/// Attendance state for a single student on a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

/// One attendance record row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: Option<String>,
}

/// Assignment issued to a class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub class_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub published: bool,
}

/// A student's submission for an assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Course in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub credits: Option<u32>,
}

/// One slot in a weekly timetable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub class_id: String,
    pub course_id: String,
    /// ISO weekday, 1 = Monday
    pub weekday: u8,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default)]
    pub room: Option<String>,
}

/// Job posting in the careers board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub open: bool,
}

/// Invoice issued to a student/guardian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub student_id: String,
    pub amount_cents: i64,
    pub currency: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Exam/term result row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub academic_year: Option<String>,
    pub score: f64,
    #[serde(default)]
    pub grade: Option<String>,
}

/// Service request raised against school facilities/administration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: String,
    pub category: String,
    pub subject: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One message in an AI-chat conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub conversation_id: String,
    /// "user" or "assistant"
    pub sender: String,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Staff directory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Child linked to a parent account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub class_id: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
}

/// Notification delivered to the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Identifier-bearing acknowledgement returned by mutations that
/// create a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: String,
}

/// Correlation id attached to traces for one logical request
#[must_use]
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    //! Unit tests for domain types.
    use serde_json::json;

    use super::*;

    /// Validates `TokenPair::new` stores both halves.
    #[test]
    fn token_pair_creation() {
        let pair = TokenPair::new("access", "refresh");
        assert_eq!(pair.access_token, "access");
        assert_eq!(pair.refresh_token, "refresh");
    }

    /// Validates lenient decoding of a user row missing optional fields.
    #[test]
    fn user_account_tolerates_missing_fields() {
        let user: UserAccount = serde_json::from_value(json!({
            "id": "u1",
            "email": "a@school.edu",
            "full_name": "A Teacher",
            "role": "teacher"
        }))
        .unwrap();

        assert_eq!(user.role, UserRole::Teacher);
        assert!(user.department.is_none());
        assert!(!user.active);
    }

    /// Validates attendance status round-trips lowercase wire values.
    #[test]
    fn attendance_status_wire_format() {
        let status: AttendanceStatus = serde_json::from_value(json!("excused")).unwrap();
        assert_eq!(status, AttendanceStatus::Excused);
        assert_eq!(serde_json::to_value(AttendanceStatus::Late).unwrap(), json!("late"));
    }

    /// Validates request ids are unique per call.
    #[test]
    fn request_ids_are_unique() {
        assert_ne!(new_request_id(), new_request_id());
    }
}
