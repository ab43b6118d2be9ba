//! Token vault: persistent storage for session tokens and device id
//!
//! The vault owns the access/refresh token pair and the generated
//! device identifier. Tokens are always written and cleared as a pair;
//! a store that ends up holding only one half reads as unauthenticated
//! (fail closed) so the caller re-authenticates instead of sending a
//! mismatched pair.
//!
//! Two implementations are provided:
//! - [`KeychainVault`]: platform keychain via the `keyring` crate
//!   (macOS Keychain, Windows Credential Manager, Linux Secret Service)
//! - [`MemoryVault`]: in-process map for tests and headless tooling

mod keychain;
mod memory;

use async_trait::async_trait;
use campushub_domain::constants::{DEVICE_ID_PREFIX, DEVICE_ID_SUFFIX_LEN};
use campushub_domain::{Result, TokenPair};

pub use keychain::KeychainVault;
pub use memory::MemoryVault;

/// Persistent storage seam for session tokens and the device id
///
/// Implementations must keep `store_tokens` atomic: after any call the
/// vault holds either both tokens or neither.
#[async_trait]
pub trait TokenVault: Send + Sync {
    /// Read the current token pair, or `None` when unauthenticated.
    ///
    /// A store holding only one half of a pair reads as `None`.
    async fn tokens(&self) -> Result<Option<TokenPair>>;

    /// Persist both tokens, replacing any previous pair.
    ///
    /// If the underlying storage fails mid-write the partial write is
    /// rolled back and the error propagated; the vault never retains a
    /// mismatched pair.
    async fn store_tokens(&self, pair: &TokenPair) -> Result<()>;

    /// Remove both tokens. Idempotent: clearing an empty vault is a
    /// no-op, not an error.
    async fn clear_tokens(&self) -> Result<()>;

    /// Return the persisted device id, generating and persisting one
    /// on first use. Stable across calls within the same install.
    async fn get_or_create_device_id(&self) -> Result<String>;

    /// Current access token, if any.
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.tokens().await?.map(|pair| pair.access_token))
    }

    /// Current refresh token, if any.
    async fn refresh_token(&self) -> Result<Option<String>> {
        Ok(self.tokens().await?.map(|pair| pair.refresh_token))
    }

    /// Whether a token pair is currently stored.
    async fn is_authenticated(&self) -> bool {
        matches!(self.tokens().await, Ok(Some(_)))
    }
}

/// Generate a fresh device identifier.
///
/// Format: `mobile_<platform>_<timestamp_ms>_<random suffix>`. The
/// caller persists the result; the id is never regenerated unless
/// storage is cleared externally.
#[must_use]
pub(crate) fn generate_device_id() -> String {
    use rand::distributions::{Alphanumeric, DistString};

    let platform = std::env::consts::OS;
    let timestamp = chrono::Utc::now().timestamp_millis();
    let suffix = Alphanumeric.sample_string(&mut rand::thread_rng(), DEVICE_ID_SUFFIX_LEN);

    format!("{}_{}_{}_{}", DEVICE_ID_PREFIX, platform, timestamp, suffix)
}
