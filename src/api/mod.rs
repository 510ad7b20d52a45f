//! The remote vault service boundary.
//!
//! `VaultService` is the request/response contract the client relies on.
//! `http::HttpService` talks to the real service; tests substitute their
//! own implementation.

pub mod http;

pub use http::HttpService;

use crate::errors::Result;
use crate::vault::{Category, Credential, CredentialId, DraftCredential};

/// Every remote call the client makes. Each call is a single attempt.
///
/// Failures are `AuthRejected` (login refused), `RemoteRejected` (any
/// other non-2xx) or `NetworkFailure` (no response at all).
pub trait VaultService {
    /// `POST /auth/login`: succeeds iff the service accepts the password.
    fn validate_master_password(&self, master_password: &str) -> Result<()>;

    /// `GET /passwords`
    fn list_credentials(&self, master_password: &str) -> Result<Vec<Credential>>;

    /// `GET /categories`
    fn list_categories(&self, master_password: &str) -> Result<Vec<Category>>;

    /// `GET /generate-password`: length and charset are the service's call.
    fn generate_password(&self) -> Result<String>;

    /// `POST /passwords`
    fn create_credential(&self, master_password: &str, draft: &DraftCredential) -> Result<()>;

    /// `DELETE /passwords/{id}`
    fn delete_credential(&self, master_password: &str, id: CredentialId) -> Result<()>;

    /// `POST /categories`
    fn create_category(&self, master_password: &str, name: &str) -> Result<()>;
}

impl<T: VaultService + ?Sized> VaultService for &T {
    fn validate_master_password(&self, master_password: &str) -> Result<()> {
        (**self).validate_master_password(master_password)
    }

    fn list_credentials(&self, master_password: &str) -> Result<Vec<Credential>> {
        (**self).list_credentials(master_password)
    }

    fn list_categories(&self, master_password: &str) -> Result<Vec<Category>> {
        (**self).list_categories(master_password)
    }

    fn generate_password(&self) -> Result<String> {
        (**self).generate_password()
    }

    fn create_credential(&self, master_password: &str, draft: &DraftCredential) -> Result<()> {
        (**self).create_credential(master_password, draft)
    }

    fn delete_credential(&self, master_password: &str, id: CredentialId) -> Result<()> {
        (**self).delete_credential(master_password, id)
    }

    fn create_category(&self, master_password: &str, name: &str) -> Result<()> {
        (**self).create_category(master_password, name)
    }
}
