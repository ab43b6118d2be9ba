//! Configured HTTP transport
//!
//! Wraps a `reqwest` client with a base URL and a fixed request
//! timeout. The transport performs no retries of its own; the only
//! replay in the whole stack is the request pipeline's single 401
//! retry. Timed-out and unreachable requests surface as network
//! errors.

use std::time::Duration;

use campushub_domain::constants::DEFAULT_REQUEST_TIMEOUT;
use campushub_domain::CampusHubError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::api::ApiError;

/// HTTP client bound to one base URL with a fixed deadline
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    base_url: String,
}

impl HttpTransport {
    /// Start building a new transport.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(base_url)
    }

    /// Convenience constructor with default configuration.
    pub fn new(base_url: impl Into<String>) -> Result<Self, CampusHubError> {
        Self::builder(base_url).build()
    }

    /// The configured base URL (no trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder for `path` relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    ///
    /// Transport-level failures (timeout, DNS, refused connection) map
    /// to [`ApiError::Network`]; anything else that prevents a response
    /// maps to [`ApiError::Unknown`]. Status codes are NOT interpreted
    /// here; the pipeline owns status handling.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::Unknown(format!("Failed to build request: {}", e)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(ApiError::from_transport(&err))
            }
        }
    }
}

/// Builder for [`HttpTransport`]
#[derive(Debug)]
pub struct HttpTransportBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl HttpTransportBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: DEFAULT_REQUEST_TIMEOUT, user_agent: None }
    }

    /// Override the fixed request timeout (default 10 seconds).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the transport, validating the base URL.
    pub fn build(self) -> Result<HttpTransport, CampusHubError> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| CampusHubError::Config(format!("Invalid base URL {}: {}", base_url, e)))?;

        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|e| CampusHubError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpTransport { client, base_url })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::ErrorKind;

    #[tokio::test]
    async fn sends_request_to_joined_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(format!("{}/", server.uri())).unwrap();
        let response =
            transport.send(transport.request(Method::GET, "/ping")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.path(), "/ping");
    }

    #[tokio::test]
    async fn does_not_interpret_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).unwrap();
        let response =
            transport.send(transport.request(Method::GET, "/down")).await.expect("response");

        // A 503 is still a response; the pipeline decides what it means.
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so requests fail with ECONNREFUSED

        let transport = HttpTransport::new(format!("http://{}", addr)).unwrap();
        let result = transport.send(transport.request(Method::GET, "/unreachable")).await;

        match result {
            Err(err) => assert_eq!(err.kind(), ErrorKind::Network),
            Ok(_) => panic!("expected network error"),
        }
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = HttpTransport::new("not a url");
        assert!(result.is_err());
    }
}
