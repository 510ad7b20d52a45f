//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;
use zeroize::Zeroizing;

use crate::api::HttpService;
use crate::app::VaultApp;
use crate::config::{default_config_dir, SessionBackend, Settings};
use crate::errors::{PwVaultError, Result};
use crate::session::{FileTier, MemoryTier, SessionStore, StorageTier};

/// pwvault CLI: client for a remote personal password vault.
#[derive(Parser)]
#[command(
    name = "pwvault",
    about = "Client for a remote personal password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base address of the vault service (overrides config.toml)
    #[arg(long, env = "PWVAULT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config directory (default: ~/.config/pwvault)
    #[arg(long, env = "PWVAULT_CONFIG_DIR", global = true)]
    pub config_dir: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Validate the master password and start a session
    Login {
        /// Keep the session across runs until `logout`
        #[arg(short, long)]
        remember: bool,
    },

    /// Forget the saved session
    Logout,

    /// Re-validate the saved session and report the result
    Status,

    /// List stored credentials
    List {
        /// Only show credentials whose name, email or URL contains this
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this category id (or `all`)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Show the password of this credential id
        #[arg(long)]
        reveal: Option<u64>,
    },

    /// Add a credential
    Add {
        /// Display name (e.g. Gmail)
        #[arg(long)]
        name: String,

        /// Login email or username
        #[arg(long)]
        email: String,

        /// Site URL
        #[arg(long)]
        url: Option<String>,

        /// Category id
        #[arg(long)]
        category: Option<u64>,

        /// Password (omit for a hidden prompt)
        #[arg(long, conflicts_with = "generate")]
        password: Option<String>,

        /// Let the server generate the password
        #[arg(short, long)]
        generate: bool,
    },

    /// Delete a credential
    Delete {
        /// Credential id
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Manage categories (list, add)
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Print a server-generated password
    Generate,

    /// Start an interactive session
    Shell,

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Category subcommands.
#[derive(clap::Subcommand)]
pub enum CategoryAction {
    /// List all categories
    List,

    /// Create a category
    Add {
        /// Category name
        name: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the config directory: `--config-dir` / `PWVAULT_CONFIG_DIR`,
/// else `~/.config/pwvault`.
pub fn config_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => default_config_dir().ok_or_else(|| {
            PwVaultError::ConfigError(
                "cannot locate a home directory; pass --config-dir".into(),
            )
        }),
    }
}

/// Load `config.toml` and apply command-line overrides.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(&config_dir(cli)?)?;
    if let Some(url) = &cli.api_url {
        settings.api_url = url.clone();
    }
    settings.validate()?;
    Ok(settings)
}

/// The persistent session tier selected in the settings.
pub fn persistent_tier(settings: &Settings, config_dir: PathBuf) -> Result<Box<dyn StorageTier>> {
    match settings.session_backend {
        SessionBackend::File => Ok(Box::new(FileTier::new(config_dir))),
        #[cfg(feature = "keyring-store")]
        SessionBackend::Keyring => Ok(Box::new(crate::keyring::KeyringTier::new())),
        #[cfg(not(feature = "keyring-store"))]
        SessionBackend::Keyring => Err(PwVaultError::KeyringError(
            "keyring support not compiled; rebuild with `cargo build --features keyring-store`"
                .into(),
        )),
    }
}

/// Build a fresh client "tab": empty in-memory tier, persistent tier
/// from config, HTTP service from config. Auth state is still `Unknown`.
pub fn build_app(cli: &Cli) -> Result<VaultApp<HttpService>> {
    let dir = config_dir(cli)?;
    let settings = load_settings(cli)?;
    let persistent = persistent_tier(&settings, dir)?;
    let store = SessionStore::new(MemoryTier::new(), persistent);
    Ok(VaultApp::new(HttpService::from_settings(&settings), store))
}

/// Build the app and make sure it is authenticated with a loaded vault.
///
/// A valid saved session is used silently. Otherwise the master password
/// is requested and a session is started for this process only.
pub fn open_authenticated(cli: &Cli) -> Result<VaultApp<HttpService>> {
    let mut app = build_app(cli)?;

    if !app.startup().is_authenticated() {
        let password = prompt_master_password()?;
        app.login(&password, false)?;
    }

    if let Some(msg) = app.error() {
        return Err(PwVaultError::Reported(msg.to_string()));
    }
    Ok(app)
}

/// Get the master password, trying in order:
/// 1. `PWVAULT_MASTER_PASSWORD` env var (scripts)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_master_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("PWVAULT_MASTER_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("confirm prompt: {e}")))
}
