//! The persisted proof of a prior successful login.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{PwVaultError, Result};

/// A saved session: the master password plus when it was saved.
///
/// Serialized as `{"masterPassword": "...", "timestamp": <unix millis>}`.
/// The password is wiped from memory when the record is dropped.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    master_password: String,

    #[zeroize(skip)]
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// A fresh record stamped with the current time.
    pub fn new(master_password: &str) -> Self {
        Self {
            master_password: master_password.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn master_password(&self) -> &str {
        &self.master_password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| PwVaultError::SerializationError(format!("session record: {e}")))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| PwVaultError::InvalidSession(e.to_string()))
    }
}

impl fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRecord")
            .field("master_password", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
