//! # CampusHub Client
//!
//! Authenticated HTTP client for the CampusHub school-management
//! platform. The crate provides:
//!
//! - A token vault with atomic access/refresh pair storage
//!   (platform keychain or in-memory)
//! - Device identity headers attached to every request
//! - A request pipeline with single-shot 401 refresh-and-retry
//! - An error normalizer mapping every failure to a fixed taxonomy
//! - A broad endpoint façade, one thin method per backend endpoint
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use campushub_client::vault::KeychainVault;
//! use campushub_client::ApiClient;
//! use campushub_domain::{ClientConfig, Environment};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::for_environment(Environment::Production, "1.4.0");
//! let vault = Arc::new(KeychainVault::new());
//! let client = ApiClient::new(config, vault).await?;
//!
//! let courses = client.list_courses(&Default::default()).await?;
//! # let _ = courses;
//! # Ok(())
//! # }
//! ```
//!
//! The client is an explicitly constructed instance owned by the
//! application's composition root; there is no ambient global.

pub mod api;
pub mod config;
pub mod device;
pub mod endpoints;
pub mod http;
pub mod vault;

pub use api::{ApiClient, ApiError, ErrorKind, RefreshCoordinator};
pub use device::DeviceContext;
pub use http::HttpTransport;
pub use vault::{KeychainVault, MemoryVault, TokenVault};
