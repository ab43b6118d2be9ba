//! Error normalizer
//!
//! Maps every failure (HTTP status, transport breakdown, malformed
//! payload) into exactly one variant of a fixed taxonomy. Each branch
//! preserves the server-supplied message when one is present and falls
//! back to a hardcoded default otherwise, so callers can always show
//! the message verbatim. The normalizer is total: it never panics and
//! always yields a value describing the failure.

use reqwest::StatusCode;
use thiserror::Error;

use campushub_domain::CampusHubError;

/// Default user-facing messages, used when the server body carries none
pub mod defaults {
    pub const BAD_REQUEST: &str = "The request could not be processed.";
    pub const UNAUTHORIZED: &str = "Your session has expired. Please sign in again.";
    pub const FORBIDDEN: &str = "You do not have permission to perform this action.";
    pub const NOT_FOUND: &str = "The requested resource was not found.";
    pub const RATE_LIMITED: &str = "Too many requests. Please try again in a moment.";
    pub const VALIDATION: &str = "The submitted data failed validation.";
    pub const SERVER: &str = "Something went wrong on our side. Please try again later.";
    pub const NETWORK: &str = "Unable to reach the server. Check your connection.";
    pub const UNKNOWN: &str = "An unexpected error occurred.";
}

/// Category of a normalized API failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    Validation,
    Server,
    Network,
    Unknown,
}

/// Normalized API failure
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Get the category for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Server(_) => ErrorKind::Server,
            Self::Network(_) => ErrorKind::Network,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// The user-facing message, without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::RateLimited(m)
            | Self::Validation(m)
            | Self::Server(m)
            | Self::Network(m)
            | Self::Unknown(m) => m,
        }
    }

    /// Whether the pipeline should attempt a token refresh for this
    /// failure. Only 401s qualify; everything else passes through.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Normalize an HTTP status plus an optional server message.
    ///
    /// Unmapped non-5xx statuses fall through to `Unknown` with the
    /// status embedded so diagnostics are not lost.
    #[must_use]
    pub fn from_status(status: StatusCode, server_message: Option<String>) -> Self {
        let msg = |fallback: &str| {
            server_message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        match status.as_u16() {
            400 => Self::BadRequest(msg(defaults::BAD_REQUEST)),
            401 => Self::Unauthorized(msg(defaults::UNAUTHORIZED)),
            403 => Self::Forbidden(msg(defaults::FORBIDDEN)),
            404 => Self::NotFound(msg(defaults::NOT_FOUND)),
            422 => Self::Validation(msg(defaults::VALIDATION)),
            429 => Self::RateLimited(msg(defaults::RATE_LIMITED)),
            s if s >= 500 => Self::Server(msg(defaults::SERVER)),
            s => Self::Unknown(msg(&format!("{} (HTTP {})", defaults::UNKNOWN, s))),
        }
    }

    /// Normalize a transport failure where no response was received.
    #[must_use]
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            Self::Network(defaults::NETWORK.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

impl From<CampusHubError> for ApiError {
    fn from(err: CampusHubError) -> Self {
        match err {
            CampusHubError::Network(m) => Self::Network(m),
            CampusHubError::Auth(m) => Self::Unauthorized(m),
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_deterministic() {
        let cases = [
            (400, ErrorKind::BadRequest),
            (401, ErrorKind::Unauthorized),
            (403, ErrorKind::Forbidden),
            (404, ErrorKind::NotFound),
            (422, ErrorKind::Validation),
            (429, ErrorKind::RateLimited),
            (500, ErrorKind::Server),
        ];

        for (code, kind) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            let err = ApiError::from_status(status, None);
            assert_eq!(err.kind(), kind, "status {}", code);
            assert!(!err.message().is_empty(), "status {} produced empty message", code);
        }
    }

    #[test]
    fn server_message_is_preserved() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            Some("Email address is already registered".to_string()),
        );

        assert_eq!(err.message(), "Email address is already registered");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn blank_server_message_falls_back_to_default() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, Some("   ".to_string()));
        assert_eq!(err.message(), defaults::NOT_FOUND);
    }

    #[test]
    fn unmapped_5xx_is_server_error() {
        let err = ApiError::from_status(StatusCode::from_u16(502).unwrap(), None);
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn unmapped_status_is_unknown_with_code() {
        let err = ApiError::from_status(StatusCode::from_u16(418).unwrap(), None);
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert!(err.message().contains("418"));
    }

    #[test]
    fn storage_failures_normalize_to_unknown() {
        let err: ApiError = CampusHubError::Storage("keychain unavailable".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }
}
