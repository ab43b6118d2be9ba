//! Keychain-backed token vault
//!
//! Thin wrapper over the platform keychain for the three persisted
//! keys (`accessToken`, `refreshToken`, `deviceId`). Works on macOS
//! (Keychain Access), Windows (Credential Manager), and Linux (Secret
//! Service API).

use async_trait::async_trait;
use campushub_domain::constants::{
    KEY_ACCESS_TOKEN, KEY_DEVICE_ID, KEY_REFRESH_TOKEN, VAULT_SERVICE_NAME,
};
use campushub_domain::{CampusHubError, Result, TokenPair};
use keyring::Entry;
use tracing::{debug, warn};

use super::{generate_device_id, TokenVault};

/// Token vault persisting to the platform keychain
pub struct KeychainVault {
    service_name: String,
}

impl KeychainVault {
    /// Create a vault using the default service name.
    #[must_use]
    pub fn new() -> Self {
        Self::with_service_name(VAULT_SERVICE_NAME)
    }

    /// Create a vault under a custom keychain service name.
    ///
    /// Useful for tests and for running several configured clients
    /// side by side (per-tenant installs).
    pub fn with_service_name(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service_name, key).map_err(|e| {
            CampusHubError::Storage(format!("Failed to create keychain entry for {}: {}", key, e))
        })
    }

    fn get_secret(&self, key: &str) -> Result<Option<String>> {
        let entry = self.entry(key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CampusHubError::Storage(format!(
                "Failed to retrieve secret for {}: {}",
                key, e
            ))),
        }
    }

    fn set_secret(&self, key: &str, value: &str) -> Result<()> {
        let entry = self.entry(key)?;
        entry.set_password(value).map_err(|e| {
            CampusHubError::Storage(format!("Failed to store secret for {}: {}", key, e))
        })
    }

    fn delete_secret(&self, key: &str) -> Result<()> {
        let entry = self.entry(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CampusHubError::Storage(format!(
                "Failed to delete secret for {}: {}",
                key, e
            ))),
        }
    }
}

impl Default for KeychainVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenVault for KeychainVault {
    async fn tokens(&self) -> Result<Option<TokenPair>> {
        let access = self.get_secret(KEY_ACCESS_TOKEN)?;
        let refresh = self.get_secret(KEY_REFRESH_TOKEN)?;

        match (access, refresh) {
            (Some(access_token), Some(refresh_token)) => {
                Ok(Some(TokenPair { access_token, refresh_token }))
            }
            (None, None) => Ok(None),
            // A lone half means a write was interrupted; treat as
            // unauthenticated and drop the remainder.
            _ => {
                warn!("vault held a mismatched token pair, clearing");
                self.delete_secret(KEY_ACCESS_TOKEN)?;
                self.delete_secret(KEY_REFRESH_TOKEN)?;
                Ok(None)
            }
        }
    }

    async fn store_tokens(&self, pair: &TokenPair) -> Result<()> {
        debug!(service = %self.service_name, "storing token pair");

        self.set_secret(KEY_ACCESS_TOKEN, &pair.access_token)?;
        if let Err(e) = self.set_secret(KEY_REFRESH_TOKEN, &pair.refresh_token) {
            // Roll back the half-written pair so the vault reads as
            // unauthenticated rather than mismatched.
            let _ = self.delete_secret(KEY_ACCESS_TOKEN);
            return Err(e);
        }

        Ok(())
    }

    async fn clear_tokens(&self) -> Result<()> {
        debug!(service = %self.service_name, "clearing token pair");

        self.delete_secret(KEY_ACCESS_TOKEN)?;
        self.delete_secret(KEY_REFRESH_TOKEN)?;
        Ok(())
    }

    async fn get_or_create_device_id(&self) -> Result<String> {
        if let Some(id) = self.get_secret(KEY_DEVICE_ID)? {
            return Ok(id);
        }

        let id = generate_device_id();
        self.set_secret(KEY_DEVICE_ID, &id)?;
        debug!(device_id = %id, "generated new device id");

        Ok(id)
    }
}
