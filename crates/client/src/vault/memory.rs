//! In-memory token vault
//!
//! Keeps the same contract as the keychain vault without touching the
//! platform keychain. Used by tests and by headless environments where
//! no secret service is available.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use campushub_domain::constants::{KEY_ACCESS_TOKEN, KEY_DEVICE_ID, KEY_REFRESH_TOKEN};
use campushub_domain::{CampusHubError, Result, TokenPair};
use tracing::warn;

use super::{generate_device_id, TokenVault};

/// Token vault backed by an in-process map
#[derive(Debug)]
pub struct MemoryVault {
    entries: RwLock<HashMap<String, String>>,
    /// Remaining writes before an injected failure; `usize::MAX` means
    /// writes never fail. Lets tests exercise the fail-closed path.
    writes_until_failure: AtomicUsize,
}

impl MemoryVault {
    /// Create an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()), writes_until_failure: AtomicUsize::new(usize::MAX) }
    }

    /// Create a vault whose writes start failing after `n` successes.
    ///
    /// With `n = 1` the first write lands and the second errors, which
    /// is exactly the partial-write scenario the atomic-pair contract
    /// guards against.
    #[must_use]
    pub fn failing_after_writes(n: usize) -> Self {
        let vault = Self::new();
        vault.writes_until_failure.store(n, Ordering::SeqCst);
        vault
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let remaining = self.writes_until_failure.load(Ordering::SeqCst);
        if remaining != usize::MAX {
            if remaining == 0 {
                return Err(CampusHubError::Storage("injected write failure".to_string()));
            }
            self.writes_until_failure.store(remaining - 1, Ordering::SeqCst);
        }

        self.entries.write().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) {
        self.entries.write().unwrap().remove(key);
    }
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenVault for MemoryVault {
    async fn tokens(&self) -> Result<Option<TokenPair>> {
        let access = self.get(KEY_ACCESS_TOKEN);
        let refresh = self.get(KEY_REFRESH_TOKEN);

        match (access, refresh) {
            (Some(access_token), Some(refresh_token)) => {
                Ok(Some(TokenPair { access_token, refresh_token }))
            }
            (None, None) => Ok(None),
            _ => {
                warn!("vault held a mismatched token pair, clearing");
                self.delete(KEY_ACCESS_TOKEN);
                self.delete(KEY_REFRESH_TOKEN);
                Ok(None)
            }
        }
    }

    async fn store_tokens(&self, pair: &TokenPair) -> Result<()> {
        self.set(KEY_ACCESS_TOKEN, &pair.access_token)?;
        if let Err(e) = self.set(KEY_REFRESH_TOKEN, &pair.refresh_token) {
            self.delete(KEY_ACCESS_TOKEN);
            return Err(e);
        }
        Ok(())
    }

    async fn clear_tokens(&self) -> Result<()> {
        self.delete(KEY_ACCESS_TOKEN);
        self.delete(KEY_REFRESH_TOKEN);
        Ok(())
    }

    async fn get_or_create_device_id(&self) -> Result<String> {
        if let Some(id) = self.get(KEY_DEVICE_ID) {
            return Ok(id);
        }

        let id = generate_device_id();
        self.set(KEY_DEVICE_ID, &id)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for vault::memory.
    use super::*;

    /// Validates the store-and-read-back roundtrip.
    ///
    /// Assertions:
    /// - Confirms both halves of the stored pair are returned.
    #[tokio::test]
    async fn store_and_read_tokens() {
        let vault = MemoryVault::new();
        vault.store_tokens(&TokenPair::new("access", "refresh")).await.unwrap();

        let tokens = vault.tokens().await.unwrap().unwrap();
        assert_eq!(tokens.access_token, "access");
        assert_eq!(tokens.refresh_token, "refresh");
        assert!(vault.is_authenticated().await);
    }

    /// Validates clearing is idempotent.
    #[tokio::test]
    async fn clear_is_idempotent() {
        let vault = MemoryVault::new();

        vault.clear_tokens().await.unwrap();
        vault.store_tokens(&TokenPair::new("a", "r")).await.unwrap();
        vault.clear_tokens().await.unwrap();
        vault.clear_tokens().await.unwrap();

        assert!(vault.tokens().await.unwrap().is_none());
    }

    /// Validates the atomic-pair contract: a write failing halfway
    /// leaves the vault unauthenticated, never mismatched.
    ///
    /// Assertions:
    /// - Ensures `store_tokens` reports the failure.
    /// - Ensures no token half survives the failed write.
    #[tokio::test]
    async fn partial_write_fails_closed() {
        let vault = MemoryVault::failing_after_writes(1);

        let result = vault.store_tokens(&TokenPair::new("access", "refresh")).await;
        assert!(result.is_err());

        assert!(vault.tokens().await.unwrap().is_none());
        assert!(vault.access_token().await.unwrap().is_none());
        assert!(vault.refresh_token().await.unwrap().is_none());
    }

    /// Validates device-id stability: two sequential calls return the
    /// same value.
    #[tokio::test]
    async fn device_id_is_stable() {
        let vault = MemoryVault::new();

        let first = vault.get_or_create_device_id().await.unwrap();
        let second = vault.get_or_create_device_id().await.unwrap();

        assert_eq!(first, second);
    }

    /// Validates a mismatched pair reads as unauthenticated and is
    /// dropped.
    #[tokio::test]
    async fn mismatched_pair_reads_as_none() {
        let vault = MemoryVault::new();
        vault.set(KEY_ACCESS_TOKEN, "orphan").unwrap();

        assert!(vault.tokens().await.unwrap().is_none());
        // The orphan half was discarded as well.
        assert!(vault.get(KEY_ACCESS_TOKEN).is_none());
    }
}
