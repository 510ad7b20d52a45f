//! Client configuration (`config.toml`).

pub mod settings;

pub use settings::{default_config_dir, AuthChannel, SessionBackend, Settings};
