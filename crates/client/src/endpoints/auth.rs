//! Authentication endpoints
//!
//! Login, registration, and session maintenance. Successful
//! login/registration stores the issued token pair atomically; logout
//! and account deletion clear it. A storage failure during login rolls
//! back and surfaces as an error, so the vault is never left holding a
//! mismatched pair.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use campushub_domain::{Profile, TokenPair};

use crate::api::{ApiClient, ApiError, ErrorKind, QueryPairs};

/// Credentials for an email/password login
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// New-account registration payload
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
}

/// Profile fields a user may change about themselves
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

/// Payload of a successful login/registration: the signed-in user plus
/// the issued token pair
#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    pub user: Profile,
    pub access_token: String,
    pub refresh_token: String,
}

impl ApiClient {
    /// Sign in with email and password.
    ///
    /// On success the issued token pair is stored atomically before the
    /// profile is returned; if storage fails the session is treated as
    /// not established and the error propagates.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<Profile, ApiError> {
        let session: SessionData = self.post("/auth/login", request).await?;
        self.store_session(&session).await?;
        info!("login succeeded");
        Ok(session.user)
    }

    /// Register a new account. Tokens are stored like a login.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<Profile, ApiError> {
        let session: SessionData = self.post("/auth/register", request).await?;
        self.store_session(&session).await?;
        Ok(session.user)
    }

    /// Sign in with the shared demo account.
    ///
    /// Only available when the environment's `allow_demo_login` flag is
    /// set; otherwise the call is rejected client-side.
    pub async fn demo_login(&self) -> Result<Profile, ApiError> {
        if !self.config().allow_demo_login {
            return Err(ApiError::Forbidden(
                "Demo login is not available in this environment.".to_string(),
            ));
        }

        let session: SessionData = self.post_empty("/auth/demo-login").await?;
        self.store_session(&session).await?;
        Ok(session.user)
    }

    /// Sign out: revoke the session server-side, then clear the vault.
    ///
    /// The vault is cleared even when revocation fails; a device that
    /// cannot reach the backend still ends up logged out locally.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let revoke: Result<Option<serde_json::Value>, ApiError> =
            self.post_empty("/auth/logout").await;
        if let Err(err) = revoke {
            warn!(error = %err, "server-side logout failed, clearing local session anyway");
        }

        self.vault().clear_tokens().await.map_err(ApiError::from)?;
        info!("session cleared");
        Ok(())
    }

    /// Fetch the signed-in user's profile.
    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.get("/auth/profile").await
    }

    /// Update the signed-in user's profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.put("/auth/profile", update).await
    }

    /// Change the signed-in user's password.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self
            .post("/auth/change-password", &ChangePasswordRequest { current_password, new_password })
            .await?;
        Ok(())
    }

    /// Request a password-reset email. Unauthenticated endpoint.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.post("/auth/forgot-password", &ForgotPasswordRequest { email }).await?;
        Ok(())
    }

    /// Permanently delete the signed-in user's account and clear the
    /// local session.
    #[instrument(skip(self))]
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self.delete("/auth/account").await?;
        self.vault().clear_tokens().await.map_err(ApiError::from)?;
        Ok(())
    }

    /// Probe backend reachability.
    ///
    /// `Ok(true)` when the backend answers 2xx, `Ok(false)` when it
    /// answers with an error status, `Err` when it cannot be reached.
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        match self.execute(Method::GET, "/health", &QueryPairs::new(), None).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::Network => Err(err),
            Err(_) => Ok(false),
        }
    }

    async fn store_session(&self, session: &SessionData) -> Result<(), ApiError> {
        let pair = TokenPair::new(&session.access_token, &session.refresh_token);
        self.vault().store_tokens(&pair).await.map_err(ApiError::from)
    }
}
