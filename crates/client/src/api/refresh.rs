//! Token refresh coordinator
//!
//! Exchanges the stored refresh token for a new access/refresh pair.
//! The coordinator owns a bare transport of its own; refresh calls
//! never pass through the request pipeline, so a 401 during refresh
//! can never recurse into another refresh.
//!
//! Failure discipline: on any failure (missing refresh token, network
//! breakdown, non-success envelope, malformed payload) the coordinator
//! reports `false` and leaves the vault untouched. Clearing the vault
//! after a failed refresh is the pipeline's responsibility, which keeps
//! the "stale refresh token is never retried" guarantee in one place.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use campushub_domain::constants::HEADER_DEVICE_ID;
use campushub_domain::{ApiEnvelope, CampusHubError, ClientConfig, TokenPair};

use super::errors::ApiError;
use crate::http::HttpTransport;
use crate::vault::TokenVault;

/// Path of the refresh endpoint, relative to the API base URL.
pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Performs token refresh against the backend on a bare transport
pub struct RefreshCoordinator {
    transport: HttpTransport,
    vault: Arc<dyn TokenVault>,
    /// Serializes refresh attempts so concurrent 401s produce at most
    /// one in-flight refresh call at a time.
    gate: Mutex<()>,
}

impl RefreshCoordinator {
    /// Build a coordinator with its own transport for `config`'s base
    /// URL.
    pub fn new(
        config: &ClientConfig,
        vault: Arc<dyn TokenVault>,
    ) -> Result<Self, CampusHubError> {
        let transport =
            HttpTransport::builder(&config.api_base_url).timeout(config.timeout).build()?;

        Ok(Self { transport, vault, gate: Mutex::new(()) })
    }

    /// Attempt one token refresh.
    ///
    /// Returns `true` when a new pair was obtained and stored, `false`
    /// on any failure. Never mutates the vault on failure.
    pub async fn try_refresh(&self) -> bool {
        let _guard = self.gate.lock().await;

        match self.refresh_once().await {
            Ok(()) => {
                info!("access token refreshed");
                true
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed");
                false
            }
        }
    }

    async fn refresh_once(&self) -> Result<(), ApiError> {
        // Re-read under the gate: a refresh that completed while we
        // waited has already replaced the pair we are about to use.
        let Some(refresh_token) = self.vault.refresh_token().await.map_err(ApiError::from)?
        else {
            return Err(ApiError::Unauthorized("No refresh token stored".to_string()));
        };
        let device_id = self.vault.get_or_create_device_id().await.map_err(ApiError::from)?;

        debug!("requesting new token pair");

        let builder = self
            .transport
            .request(Method::POST, REFRESH_PATH)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", refresh_token))
            .header(HEADER_DEVICE_ID, device_id)
            .json(&RefreshRequest { refresh_token: &refresh_token });

        let response = self.transport.send(builder).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status, None));
        }

        let envelope: ApiEnvelope<TokenPair> = response
            .json()
            .await
            .map_err(|e| ApiError::Unknown(format!("Failed to parse refresh response: {}", e)))?;

        match envelope.into_parts() {
            Ok((Some(pair), _)) => {
                self.vault.store_tokens(&pair).await.map_err(ApiError::from)?;
                Ok(())
            }
            Ok((None, _)) => {
                Err(ApiError::Unknown("Refresh response carried no token pair".to_string()))
            }
            Err(message) => Err(ApiError::Unauthorized(
                message.unwrap_or_else(|| "Refresh rejected".to_string()),
            )),
        }
    }
}
