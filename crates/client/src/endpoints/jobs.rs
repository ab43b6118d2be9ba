//! Careers-board endpoints

use serde::Serialize;

use campushub_domain::{CreatedId, JobPosting};

use crate::api::{ApiClient, ApiError, QueryPairs};

/// Filter for the job listing
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub department: Option<String>,
    /// Only postings still accepting applications
    pub open_only: Option<bool>,
    pub limit: Option<u32>,
    pub after: Option<String>,
}

impl JobFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("department", self.department.as_deref())
            .push_opt_display("open_only", self.open_only)
            .push_opt_display("limit", self.limit)
            .push_opt("after", self.after.as_deref());
        query
    }
}

/// Payload for creating a posting
#[derive(Debug, Clone, Serialize)]
pub struct NewJobPosting {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

#[derive(Debug, Serialize)]
struct JobApplication<'a> {
    cover_letter: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    resume_url: Option<&'a str>,
}

impl ApiClient {
    /// List job postings matching `filter`.
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, ApiError> {
        self.get_with("/jobs", filter.to_query()).await
    }

    /// Fetch one posting.
    pub async fn get_job(&self, job_id: &str) -> Result<JobPosting, ApiError> {
        self.get(&format!("/jobs/{}", job_id)).await
    }

    /// Create a posting.
    pub async fn create_job(&self, job: &NewJobPosting) -> Result<JobPosting, ApiError> {
        self.post("/jobs", job).await
    }

    /// Stop accepting applications for a posting.
    pub async fn close_job(&self, job_id: &str) -> Result<JobPosting, ApiError> {
        self.post_empty(&format!("/jobs/{}/close", job_id)).await
    }

    /// Apply for a posting.
    pub async fn apply_for_job(
        &self,
        job_id: &str,
        cover_letter: &str,
        resume_url: Option<&str>,
    ) -> Result<CreatedId, ApiError> {
        self.post(&format!("/jobs/{}/apply", job_id), &JobApplication { cover_letter, resume_url })
            .await
    }
}
