//! Results endpoints
//!
//! Exam/term results: recording, publication, and the various read
//! views (per student, per class, own results).

use serde::Serialize;
use tracing::instrument;

use campushub_domain::ExamResult;

use crate::api::{ApiClient, ApiError, QueryPairs};

/// Term filter shared by the result listings
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub course_id: Option<String>,
}

impl ResultFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("academic_year", self.academic_year.as_deref())
            .push_opt("semester", self.semester.as_deref())
            .push_opt("course_id", self.course_id.as_deref());
        query
    }
}

/// Payload for recording one result
#[derive(Debug, Clone, Serialize)]
pub struct NewResult {
    pub student_id: String,
    pub course_id: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
}

/// Correction of a recorded result
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    semester: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    academic_year: Option<&'a str>,
}

impl ApiClient {
    /// Results recorded for one student.
    pub async fn student_results(
        &self,
        student_id: &str,
        filter: &ResultFilter,
    ) -> Result<Vec<ExamResult>, ApiError> {
        self.get_with(&format!("/results/students/{}", student_id), filter.to_query()).await
    }

    /// Results recorded for one class.
    pub async fn class_results(
        &self,
        class_id: &str,
        filter: &ResultFilter,
    ) -> Result<Vec<ExamResult>, ApiError> {
        self.get_with(&format!("/results/classes/{}", class_id), filter.to_query()).await
    }

    /// The signed-in student's own published results.
    pub async fn my_results(&self, filter: &ResultFilter) -> Result<Vec<ExamResult>, ApiError> {
        self.get_with("/results/my", filter.to_query()).await
    }

    /// Record one result.
    pub async fn record_result(&self, result: &NewResult) -> Result<ExamResult, ApiError> {
        self.post("/results", result).await
    }

    /// Correct a recorded result.
    pub async fn update_result(
        &self,
        result_id: &str,
        update: &ResultUpdate,
    ) -> Result<ExamResult, ApiError> {
        self.put(&format!("/results/{}", result_id), update).await
    }

    /// Publish a class's results for a term, making them visible to
    /// students and parents.
    #[instrument(skip(self))]
    pub async fn publish_class_results(
        &self,
        class_id: &str,
        semester: Option<&str>,
        academic_year: Option<&str>,
    ) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self
            .post(
                &format!("/results/classes/{}/publish", class_id),
                &PublishRequest { semester, academic_year },
            )
            .await?;
        Ok(())
    }
}
