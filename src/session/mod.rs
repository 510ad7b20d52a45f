//! Session persistence.
//!
//! This module provides:
//! - `SessionRecord`, the saved proof of a login (`record`)
//! - The `StorageTier` trait and its memory/file backends (`tier`)
//! - `SessionStore`, the two-tier precedence and promotion rules (`store`)

pub mod record;
pub mod store;
pub mod tier;

// Re-export the most commonly used items.
pub use record::SessionRecord;
pub use store::{resolve_tiers, Resolution, SessionStore, TierKind, SESSION_KEY};
pub use tier::{FileTier, MemoryTier, StorageTier};
