//! Device identity headers
//!
//! Every outgoing request carries device metadata so the backend can
//! audit and rate-limit per install: the persisted device id, the
//! platform, and the OS/app versions. The id itself comes from the
//! vault ([`crate::vault::TokenVault::get_or_create_device_id`]); the
//! rest is supplied once at construction.

use campushub_domain::constants::{HEADER_DEVICE_ID, HEADER_OS_VERSION, HEADER_PLATFORM};
use campushub_domain::{DeviceIdentity, Result};

use crate::vault::TokenVault;

/// Device metadata resolved once and reused for every request
#[derive(Debug, Clone)]
pub struct DeviceContext {
    identity: DeviceIdentity,
}

impl DeviceContext {
    /// Build a context from fully caller-supplied metadata.
    #[must_use]
    pub fn new(identity: DeviceIdentity) -> Self {
        Self { identity }
    }

    /// Resolve a context from the vault's persisted device id, filling
    /// platform fields from the build target.
    ///
    /// Hosts that know their real OS version, model, and brand should
    /// construct the [`DeviceIdentity`] themselves and use
    /// [`DeviceContext::new`]; the defaults here identify only the
    /// platform family.
    pub async fn resolve(vault: &dyn TokenVault, app_version: &str) -> Result<Self> {
        let device_id = vault.get_or_create_device_id().await?;

        Ok(Self::new(DeviceIdentity {
            device_id,
            platform: std::env::consts::OS.to_string(),
            os_version: std::env::consts::OS.to_string(),
            app_version: app_version.to_string(),
            model: "unknown".to_string(),
            brand: "unknown".to_string(),
        }))
    }

    /// The persisted device id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.identity.device_id
    }

    /// Full identity record.
    #[must_use]
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Header name/value pairs attached to every request.
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            (HEADER_DEVICE_ID, self.identity.device_id.clone()),
            (HEADER_PLATFORM, self.identity.platform.clone()),
            (HEADER_OS_VERSION, self.identity.os_version.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for device.
    use super::*;
    use crate::vault::MemoryVault;

    fn sample_identity() -> DeviceIdentity {
        DeviceIdentity {
            device_id: "mobile_linux_1700000000000_abc12345".to_string(),
            platform: "linux".to_string(),
            os_version: "6.1".to_string(),
            app_version: "1.4.0".to_string(),
            model: "Pixel 8".to_string(),
            brand: "Google".to_string(),
        }
    }

    /// Validates the three device headers are always present.
    #[test]
    fn headers_cover_device_metadata() {
        let context = DeviceContext::new(sample_identity());
        let headers = context.headers();

        assert_eq!(headers.len(), 3);
        assert!(headers.iter().any(|(name, value)| {
            *name == HEADER_DEVICE_ID && value == "mobile_linux_1700000000000_abc12345"
        }));
        assert!(headers.iter().any(|(name, value)| *name == HEADER_PLATFORM && value == "linux"));
        assert!(headers.iter().any(|(name, value)| *name == HEADER_OS_VERSION && value == "6.1"));
    }

    /// Validates resolving twice reuses the vault's persisted id.
    #[tokio::test]
    async fn resolve_reuses_persisted_device_id() {
        let vault = MemoryVault::new();

        let first = DeviceContext::resolve(&vault, "1.0.0").await.unwrap();
        let second = DeviceContext::resolve(&vault, "1.0.0").await.unwrap();

        assert_eq!(first.device_id(), second.device_id());
    }
}
