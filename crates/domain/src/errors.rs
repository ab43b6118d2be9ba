//! Error types used throughout the client SDK

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for CampusHub client operations
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CampusHubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for CampusHub operations
pub type Result<T> = std::result::Result<T, CampusHubError>;
