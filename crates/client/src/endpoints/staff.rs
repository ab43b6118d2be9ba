//! Staff-directory endpoints

use campushub_domain::StaffMember;

use crate::api::{ApiClient, ApiError, QueryPairs};

/// Filter for the staff directory
#[derive(Debug, Clone, Default)]
pub struct StaffFilter {
    pub department: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl StaffFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("department", self.department.as_deref())
            .push_opt("search", self.search.as_deref())
            .push_opt_display("limit", self.limit);
        query
    }
}

impl ApiClient {
    /// Browse the staff directory.
    pub async fn staff_directory(
        &self,
        filter: &StaffFilter,
    ) -> Result<Vec<StaffMember>, ApiError> {
        self.get_with("/staff", filter.to_query()).await
    }

    /// Fetch one directory entry.
    pub async fn staff_member(&self, staff_id: &str) -> Result<StaffMember, ApiError> {
        self.get(&format!("/staff/{}", staff_id)).await
    }

    /// Department names used across the directory.
    pub async fn staff_departments(&self) -> Result<Vec<String>, ApiError> {
        self.get("/staff/departments").await
    }
}
