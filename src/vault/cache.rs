//! `VaultCache`: the session's read-through copy of the remote vault.
//!
//! Lists are only ever replaced wholesale by a fetch. Mutations go to the
//! service first and are followed by a reload, so what the cache holds is
//! always a complete server response.

use tracing::debug;

use crate::api::VaultService;
use crate::errors::{Operation, PwVaultError, Result};

use super::model::{Category, Credential, CredentialId, DraftCredential};

#[derive(Debug, Default, Clone)]
pub struct VaultCache {
    credentials: Vec<Credential>,
    categories: Vec<Category>,
}

impl VaultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find(&self, id: CredentialId) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    /// Drop everything (logout).
    pub fn reset(&mut self) {
        self.credentials.clear();
        self.categories.clear();
    }

    // ------------------------------------------------------------------
    // Fetches
    // ------------------------------------------------------------------

    /// Fetch both lists, each replacing its local copy on success.
    ///
    /// Categories are still fetched when the credential fetch fails; the
    /// first failure is returned.
    pub fn load(&mut self, service: &impl VaultService, master_password: &str) -> Result<()> {
        let credentials = self.load_credentials(service, master_password);
        let categories = self.load_categories(service, master_password);
        credentials.and(categories)
    }

    pub fn load_credentials(
        &mut self,
        service: &impl VaultService,
        master_password: &str,
    ) -> Result<()> {
        let fresh = service
            .list_credentials(master_password)
            .map_err(|e| e.during(Operation::FetchCredentials))?;
        debug!(count = fresh.len(), "credentials replaced");
        self.credentials = fresh;
        Ok(())
    }

    pub fn load_categories(
        &mut self,
        service: &impl VaultService,
        master_password: &str,
    ) -> Result<()> {
        let fresh = service
            .list_categories(master_password)
            .map_err(|e| e.during(Operation::FetchCategories))?;
        debug!(count = fresh.len(), "categories replaced");
        self.categories = fresh;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutations (write through, then reload)
    // ------------------------------------------------------------------

    /// Submit `draft`. On success the draft is reset and the vault
    /// reloaded; on failure the draft is left exactly as it was.
    pub fn add_credential(
        &mut self,
        service: &impl VaultService,
        master_password: &str,
        draft: &mut DraftCredential,
    ) -> Result<()> {
        service
            .create_credential(master_password, draft)
            .map_err(|e| e.during(Operation::AddCredential))?;
        draft.reset();
        self.load(service, master_password)
    }

    /// Delete on the server, then reload. Nothing is removed locally on
    /// failure.
    pub fn delete_credential(
        &mut self,
        service: &impl VaultService,
        master_password: &str,
        id: CredentialId,
    ) -> Result<()> {
        service
            .delete_credential(master_password, id)
            .map_err(|e| e.during(Operation::DeleteCredential))?;
        self.load(service, master_password)
    }

    /// Create a category, then reload the category list.
    pub fn add_category(
        &mut self,
        service: &impl VaultService,
        master_password: &str,
        name: &str,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PwVaultError::CommandFailed(
                "category name cannot be empty".into(),
            ));
        }

        service
            .create_category(master_password, name)
            .map_err(|e| e.during(Operation::AddCategory))?;
        self.load_categories(service, master_password)
    }
}
