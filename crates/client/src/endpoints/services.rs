//! Service-request endpoints
//!
//! Requests raised against school facilities/administration (transport,
//! certificates, maintenance, ...).

use serde::Serialize;

use campushub_domain::ServiceRequest;

use crate::api::{ApiClient, ApiError, QueryPairs};

/// Filter for the service-request listing
#[derive(Debug, Clone, Default)]
pub struct ServiceRequestFilter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
}

impl ServiceRequestFilter {
    fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::new();
        query
            .push_opt("category", self.category.as_deref())
            .push_opt("status", self.status.as_deref())
            .push_opt_display("limit", self.limit);
        query
    }
}

/// Payload for raising a request
#[derive(Debug, Clone, Serialize)]
pub struct NewServiceRequest {
    pub category: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusUpdate<'a> {
    status: &'a str,
}

impl ApiClient {
    /// List the caller's service requests.
    pub async fn list_service_requests(
        &self,
        filter: &ServiceRequestFilter,
    ) -> Result<Vec<ServiceRequest>, ApiError> {
        self.get_with("/services/requests", filter.to_query()).await
    }

    /// Raise a new request.
    pub async fn create_service_request(
        &self,
        request: &NewServiceRequest,
    ) -> Result<ServiceRequest, ApiError> {
        self.post("/services/requests", request).await
    }

    /// Fetch one request.
    pub async fn get_service_request(&self, request_id: &str) -> Result<ServiceRequest, ApiError> {
        self.get(&format!("/services/requests/{}", request_id)).await
    }

    /// Move a request to a new status (staff only).
    pub async fn update_service_request_status(
        &self,
        request_id: &str,
        status: &str,
    ) -> Result<ServiceRequest, ApiError> {
        self.post(&format!("/services/requests/{}/status", request_id), &StatusUpdate { status })
            .await
    }

    /// Withdraw one of the caller's own requests.
    pub async fn cancel_service_request(&self, request_id: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.delete(&format!("/services/requests/{}", request_id)).await?;
        Ok(())
    }
}
