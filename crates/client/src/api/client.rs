//! Request pipeline
//!
//! `ApiClient` is the interceptor-wrapped transport every façade
//! method goes through. Per outgoing request the pipeline:
//!
//! 1. composes headers (bearer token only when one is stored, device
//!    headers always);
//! 2. sends the request;
//! 3. passes successful responses through unmodified;
//! 4. on a 401 that has not been retried yet, asks the refresh
//!    coordinator for a new pair and replays the original request
//!    exactly once; a failed refresh clears the vault and the original
//!    401 propagates;
//! 5. propagates every other failure immediately.
//!
//! The retried state is an explicit local, so the loop is bounded at
//! two sends and one refresh per logical request.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use campushub_common::{Cache, CacheConfig};
use campushub_domain::constants::DEFAULT_CACHE_TTL;
use campushub_domain::{ApiEnvelope, CampusHubError, ClientConfig};

use super::errors::{defaults, ApiError};
use super::query::QueryPairs;
use super::refresh::RefreshCoordinator;
use crate::device::DeviceContext;
use crate::http::HttpTransport;
use crate::vault::TokenVault;

/// Authenticated API client with single-shot 401 refresh-and-retry
///
/// Constructed once by the application's composition root and passed
/// to callers; multiple configured instances (e.g. per-tenant base
/// URLs) can coexist.
pub struct ApiClient {
    transport: HttpTransport,
    vault: Arc<dyn TokenVault>,
    device: DeviceContext,
    refresher: RefreshCoordinator,
    config: ClientConfig,
    /// Opt-in response cache keyed by path; only [`ApiClient::get_cached`]
    /// consults it.
    response_cache: Cache<String, serde_json::Value>,
}

impl ApiClient {
    /// Create a client, resolving the device context from the vault.
    pub async fn new(
        config: ClientConfig,
        vault: Arc<dyn TokenVault>,
    ) -> Result<Self, CampusHubError> {
        let device = DeviceContext::resolve(vault.as_ref(), &config.app_version).await?;
        Self::with_device(config, vault, device)
    }

    /// Create a client with caller-supplied device metadata.
    pub fn with_device(
        config: ClientConfig,
        vault: Arc<dyn TokenVault>,
        device: DeviceContext,
    ) -> Result<Self, CampusHubError> {
        let transport =
            HttpTransport::builder(&config.api_base_url).timeout(config.timeout).build()?;
        let refresher = RefreshCoordinator::new(&config, Arc::clone(&vault))?;
        let response_cache = Cache::new(CacheConfig::new(128, DEFAULT_CACHE_TTL));

        Ok(Self { transport, vault, device, refresher, config, response_cache })
    }

    /// The configuration the client was built from.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The token vault backing this client.
    #[must_use]
    pub fn vault(&self) -> &Arc<dyn TokenVault> {
        &self.vault
    }

    /// Device metadata attached to every request.
    #[must_use]
    pub fn device(&self) -> &DeviceContext {
        &self.device
    }

    /// Execute one logical request through the pipeline.
    ///
    /// Returns the raw response on any 2xx status; every failure is
    /// normalized to [`ApiError`].
    #[instrument(skip(self, query, body), fields(path = %path))]
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &QueryPairs,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let request_id = campushub_domain::new_request_id();
        debug!(%request_id, "dispatching request");

        let mut already_retried = false;

        loop {
            let request = self.compose(method.clone(), path, query, body).await?;
            let response = self.transport.send(request).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            let message = Self::read_server_message(response).await;

            if status == StatusCode::UNAUTHORIZED && !already_retried {
                already_retried = true;
                debug!(path, "received 401, attempting token refresh");

                if self.refresher.try_refresh().await {
                    debug!(path, "refresh succeeded, replaying request once");
                    continue;
                }

                warn!(path, "refresh failed, clearing session tokens");
                if let Err(err) = self.vault.clear_tokens().await {
                    warn!(error = %err, "failed to clear tokens after refresh failure");
                }
                return Err(ApiError::from_status(status, message));
            }

            return Err(ApiError::from_status(status, message));
        }
    }

    /// Compose one attempt: device headers always, bearer token only
    /// when one is stored.
    async fn compose(
        &self,
        method: Method,
        path: &str,
        query: &QueryPairs,
        body: Option<&serde_json::Value>,
    ) -> Result<RequestBuilder, ApiError> {
        let mut builder =
            self.transport.request(method, path).header(CONTENT_TYPE, "application/json");

        for (name, value) in self.device.headers() {
            builder = builder.header(name, value);
        }

        // Unauthenticated endpoints proceed without the header; a
        // missing token must never be sent as "Bearer null".
        if let Some(token) = self.vault.access_token().await.map_err(ApiError::from)? {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if !query.is_empty() {
            builder = builder.query(query.as_pairs());
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        Ok(builder)
    }

    /// Extract the envelope message from a failure body, if any.
    async fn read_server_message(response: Response) -> Option<String> {
        let text = response.text().await.ok()?;
        if text.is_empty() {
            return None;
        }

        serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&text)
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|message| !message.trim().is_empty())
    }

    /// Decode a successful response's envelope into its payload.
    ///
    /// An envelope with `success: false` surfaces as a façade-level
    /// validation error carrying the server message. A missing `data`
    /// field decodes as JSON null so unit and `Option` payloads work.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Unknown(format!("Failed to parse response: {}", e)))?;

        match envelope.into_parts() {
            Ok((Some(data), _)) => Ok(data),
            Ok((None, _)) => serde_json::from_value(serde_json::Value::Null)
                .map_err(|_| ApiError::Unknown("Response carried no data".to_string())),
            Err(message) => Err(ApiError::Validation(
                message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| defaults::VALIDATION.to_string()),
            )),
        }
    }

    // Verb helpers used by the endpoint façade. Public so callers can
    // reach endpoints the façade does not cover yet.

    /// GET `path` and decode the envelope payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, &QueryPairs::new(), None).await?;
        Self::decode(response).await
    }

    /// GET `path` with query parameters.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: QueryPairs,
    ) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, &query, None).await?;
        Self::decode(response).await
    }

    /// POST `body` to `path`.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::to_body(body)?;
        let response = self.execute(Method::POST, path, &QueryPairs::new(), Some(&body)).await?;
        Self::decode(response).await
    }

    /// POST to `path` with no body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(Method::POST, path, &QueryPairs::new(), None).await?;
        Self::decode(response).await
    }

    /// PUT `body` to `path`.
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::to_body(body)?;
        let response = self.execute(Method::PUT, path, &QueryPairs::new(), Some(&body)).await?;
        Self::decode(response).await
    }

    /// PATCH `body` to `path`.
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = Self::to_body(body)?;
        let response = self.execute(Method::PATCH, path, &QueryPairs::new(), Some(&body)).await?;
        Self::decode(response).await
    }

    /// DELETE `path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(Method::DELETE, path, &QueryPairs::new(), None).await?;
        Self::decode(response).await
    }

    /// GET `path` through the opt-in response cache.
    ///
    /// Within the cache TTL (default 5 minutes) repeated calls for the
    /// same path reuse the previous payload without a network call;
    /// stale entries are refetched and replaced. Mutating callers can
    /// drop an entry early with [`ApiClient::invalidate_cached`].
    pub async fn get_cached<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self
            .response_cache
            .get_or_fetch(path.to_string(), || self.get::<serde_json::Value>(path))
            .await?;

        serde_json::from_value(value)
            .map_err(|e| ApiError::Unknown(format!("Failed to decode cached response: {}", e)))
    }

    /// Drop the cached payload for `path`, if any.
    pub fn invalidate_cached(&self, path: &str) {
        self.response_cache.remove(&path.to_string());
    }

    fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body)
            .map_err(|e| ApiError::Unknown(format!("Failed to serialize body: {}", e)))
    }
}
