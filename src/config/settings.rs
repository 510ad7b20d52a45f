use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PwVaultError, Result};

/// How the master password travels to the remote service on vault requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthChannel {
    /// Query parameter on reads, body field on writes. Matches the
    /// existing service's wire contract.
    #[default]
    Query,
    /// `X-Master-Password` header on every vault request; never in the URL.
    Header,
}

/// Where remembered sessions are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// A JSON file inside the config directory.
    #[default]
    File,
    /// The OS keyring (requires the `keyring-store` feature).
    Keyring,
}

/// Client configuration, loaded from `<config_dir>/config.toml`.
///
/// Every field has a sensible default so pwvault works out-of-the-box
/// against a local service without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base address of the remote vault service.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Channel used for the master password on vault requests.
    #[serde(default)]
    pub auth_channel: AuthChannel,

    /// Backend for the persistent ("remember me") session tier.
    #[serde(default)]
    pub session_backend: SessionBackend,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth_channel: AuthChannel::default(),
            session_backend: SessionBackend::default(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PwVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that cannot possibly work.
    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PwVaultError::ConfigError(format!(
                "api_url '{url}' must start with http:// or https://"
            )));
        }
        Ok(())
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }
}

/// Default config directory: `$HOME/.config/pwvault` on all platforms.
pub fn default_config_dir() -> Option<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(PathBuf::from(home).join(".config").join("pwvault"))
}

// ── Tests ────────────────────────────────────────────────────────────
