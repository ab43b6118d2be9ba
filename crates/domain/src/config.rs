//! Client configuration structures
//!
//! The backend base URL is selected at startup from a static environment
//! table keyed by build mode. Each entry carries the base URL, a human
//! label, and feature flags consumed by callers (mock data, demo login).
//! The table is consulted once when the client is constructed and not
//! revisited afterwards.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REQUEST_TIMEOUT;
use crate::errors::CampusHubError;

/// Build mode the client runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Resolve the static configuration entry for this environment.
    #[must_use]
    pub fn config(self) -> EnvironmentConfig {
        match self {
            Self::Development => EnvironmentConfig {
                api_base_url: "https://dev-api.campushub.app/api/v1".to_string(),
                label: "Development".to_string(),
                use_mock_data: true,
                allow_demo_login: true,
            },
            Self::Production => EnvironmentConfig {
                api_base_url: "https://api.campushub.app/api/v1".to_string(),
                label: "Production".to_string(),
                use_mock_data: false,
                allow_demo_login: false,
            },
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = CampusHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(CampusHubError::Config(format!("Unknown environment: {}", other))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// One entry of the static environment table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Backend base URL including the API version prefix
    pub api_base_url: String,
    /// Human-readable label shown in diagnostics
    pub label: String,
    /// Whether callers may substitute bundled mock data for reads
    pub use_mock_data: bool,
    /// Whether the demo login shortcut is offered
    pub allow_demo_login: bool,
}

/// Resolved configuration the client is constructed from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "https://api.campushub.app/api/v1")
    pub api_base_url: String,
    /// Fixed request timeout
    #[serde(with = "timeout_secs", default = "default_timeout")]
    pub timeout: Duration,
    /// Application version reported in device headers
    pub app_version: String,
    /// Feature flags inherited from the environment entry
    pub use_mock_data: bool,
    pub allow_demo_login: bool,
}

impl ClientConfig {
    /// Build a configuration from one environment-table entry.
    #[must_use]
    pub fn for_environment(env: Environment, app_version: impl Into<String>) -> Self {
        let entry = env.config();
        Self {
            api_base_url: entry.api_base_url,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            app_version: app_version.into(),
            use_mock_data: entry.use_mock_data,
            allow_demo_login: entry.allow_demo_login,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Production, env!("CARGO_PKG_VERSION"))
    }
}

fn default_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

/// Serialize the timeout as whole seconds so config files stay readable.
mod timeout_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
