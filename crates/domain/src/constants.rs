//! Domain constants
//!
//! Centralized location for header names, storage keys, and default
//! values shared across the client SDK.

use std::time::Duration;

// Request headers attached to every outgoing call
pub const HEADER_DEVICE_ID: &str = "X-Device-Id";
pub const HEADER_PLATFORM: &str = "X-Platform";
pub const HEADER_OS_VERSION: &str = "X-OS-Version";

// Persisted storage keys (flat strings, no versioning scheme)
pub const KEY_ACCESS_TOKEN: &str = "accessToken";
pub const KEY_REFRESH_TOKEN: &str = "refreshToken";
pub const KEY_DEVICE_ID: &str = "deviceId";

// Keychain service name for the token vault
pub const VAULT_SERVICE_NAME: &str = "CampusHub.auth";

/// Fixed transport deadline; timed-out requests surface as network errors.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default staleness window for the opt-in response cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Prefix used when generating a device identifier on first use.
pub const DEVICE_ID_PREFIX: &str = "mobile";

/// Length of the random suffix in a generated device identifier.
pub const DEVICE_ID_SUFFIX_LEN: usize = 8;
