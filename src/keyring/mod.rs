//! OS keyring backend for the persistent session tier.
//!
//! Stores the session record in the operating system's secure
//! credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)

use zeroize::Zeroizing;

use crate::errors::{PwVaultError, Result};
use crate::session::StorageTier;

/// Service name used in the OS keyring.
const SERVICE_NAME: &str = "pwvault";

/// Persistent tier backed by the OS keyring, one entry per key.
#[derive(Debug, Clone, Default)]
pub struct KeyringTier;

impl KeyringTier {
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(SERVICE_NAME, key).map_err(|e| {
            PwVaultError::KeyringError(format!("failed to create keyring entry: {e}"))
        })
    }
}

impl StorageTier for KeyringTier {
    fn name(&self) -> &'static str {
        "keyring"
    }

    /// Returns `None` if nothing is stored (rather than an error).
    fn read(&self, key: &str) -> Result<Option<Zeroizing<String>>> {
        match Self::entry(key)?.get_password() {
            Ok(value) => Ok(Some(Zeroizing::new(value))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(PwVaultError::KeyringError(format!(
                "failed to read from keyring: {e}"
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        Self::entry(key)?.set_password(value).map_err(|e| {
            PwVaultError::KeyringError(format!("failed to store session in keyring: {e}"))
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already gone, that's fine.
            Err(e) => Err(PwVaultError::KeyringError(format!(
                "failed to delete from keyring: {e}"
            ))),
        }
    }
}
