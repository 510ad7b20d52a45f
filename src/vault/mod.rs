//! Vault module: the client-side view of the remote vault.
//!
//! This module provides:
//! - `Credential`, `Category` and `DraftCredential` types (`model`)
//! - `VaultCache`, the mutate-then-reload mirror of the service (`cache`)
//! - Search/category filtering over cached credentials (`filter`)
//! - Server-side password generation into the draft (`generator`)

pub mod cache;
pub mod filter;
pub mod generator;
pub mod model;

// Re-export the most commonly used items.
pub use cache::VaultCache;
pub use filter::{filter, CategoryFilter, FilterPredicate};
pub use model::{Category, CategoryId, Credential, CredentialId, DraftCredential};
