//! Credential, Category and DraftCredential types.
//!
//! Credentials and categories are owned by the remote service; the
//! client only ever holds read-through copies. Field names follow the
//! service's JSON (snake_case).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::PwVaultError;

/// Server-assigned credential identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(pub u64);

/// Server-assigned category identity.
///
/// `Display` is the canonical string form the filter compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CredentialId {
    type Err = PwVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| PwVaultError::CommandFailed(format!("'{s}' is not a credential id")))
    }
}

impl FromStr for CategoryId {
    type Err = PwVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| PwVaultError::CommandFailed(format!("'{s}' is not a category id")))
    }
}

/// A stored site credential as returned by `GET /passwords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: CredentialId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub password: String,
    /// Opaque server timestamp, shown as-is.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A category as returned by `GET /categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Unsaved form state for a new credential.
///
/// The empty value (`Default`) is the state before any input and after
/// every successful submit.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DraftCredential {
    pub name: String,
    pub email: String,
    pub url: String,
    #[zeroize(skip)]
    pub category_id: Option<CategoryId>,
    pub password: String,
}

impl DraftCredential {
    /// Reset to the empty initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `url` as sent on the wire: blank becomes `null`.
    pub fn url_or_none(&self) -> Option<&str> {
        let url = self.url.trim();
        (!url.is_empty()).then_some(url)
    }
}

impl fmt::Debug for DraftCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftCredential")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("url", &self.url)
            .field("category_id", &self.category_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_parses_service_json() {
        let raw = r#"{
            "id": 7,
            "name": "Gmail",
            "email": "me@example.com",
            "url": null,
            "category_id": 2,
            "category_name": "Email",
            "password": "pw",
            "created_at": "2024-05-01 10:00:00.123456"
        }"#;
        let c: Credential = serde_json::from_str(raw).unwrap();
        assert_eq!(c.id, CredentialId(7));
        assert_eq!(c.url, None);
        assert_eq!(c.category_id, Some(CategoryId(2)));
        assert_eq!(c.category_id.unwrap().to_string(), "2");
    }

    #[test]
    fn credential_tolerates_missing_optional_fields() {
        let raw = r#"{"id": 1, "name": "n", "email": "e", "password": "p"}"#;
        let c: Credential = serde_json::from_str(raw).unwrap();
        assert_eq!(c.category_id, None);
        assert_eq!(c.created_at, None);
    }

    #[test]
    fn draft_reset_restores_empty_value() {
        let mut draft = DraftCredential {
            name: "Bank".into(),
            email: "me@bank.test".into(),
            url: "https://bank.test".into(),
            category_id: Some(CategoryId(4)),
            password: "pw".into(),
        };
        assert!(!draft.is_empty());

        draft.reset();
        assert_eq!(draft, DraftCredential::default());
        assert!(draft.is_empty());
    }

    #[test]
    fn blank_url_goes_out_as_none() {
        let mut draft = DraftCredential::default();
        assert_eq!(draft.url_or_none(), None);
        draft.url = "  ".into();
        assert_eq!(draft.url_or_none(), None);
        draft.url = "https://x.test".into();
        assert_eq!(draft.url_or_none(), Some("https://x.test"));
    }

    #[test]
    fn ids_parse_from_strings() {
        assert_eq!("12".parse::<CredentialId>().unwrap(), CredentialId(12));
        assert_eq!(" 3 ".parse::<CategoryId>().unwrap(), CategoryId(3));
        assert!("abc".parse::<CredentialId>().is_err());
    }
}
