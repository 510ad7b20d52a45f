//! `VaultApp`: one client "tab": auth gate, vault cache and form state.
//!
//! Every user action is a method here. Each one is a single attempt; on
//! failure the human-readable message is stored in the gate's error slot
//! and the error is also returned to the caller.

use crate::api::VaultService;
use crate::auth::{AuthGate, AuthState};
use crate::errors::{PwVaultError, Result};
use crate::session::SessionStore;
use crate::vault::{
    filter, generator, CategoryFilter, Credential, CredentialId, DraftCredential, FilterPredicate,
    VaultCache,
};

pub struct VaultApp<S: VaultService> {
    service: S,
    gate: AuthGate,
    cache: VaultCache,
    draft: DraftCredential,
    filter: FilterPredicate,
    /// Table row whose password is shown, if any.
    revealed: Option<CredentialId>,
    /// Whether the draft form shows its password field.
    draft_password_visible: bool,
}

impl<S: VaultService> VaultApp<S> {
    pub fn new(service: S, store: SessionStore) -> Self {
        Self {
            service,
            gate: AuthGate::new(store),
            cache: VaultCache::new(),
            draft: DraftCredential::default(),
            filter: FilterPredicate::default(),
            revealed: None,
            draft_password_visible: false,
        }
    }

    // ------------------------------------------------------------------
    // Auth transitions
    // ------------------------------------------------------------------

    /// Revalidate any saved session; load the vault if it holds.
    pub fn startup(&mut self) -> &AuthState {
        self.gate.startup(&self.service);
        if self.gate.state().is_authenticated() {
            // A failed initial load is reported through the error slot.
            let _ = self.refresh();
        }
        self.gate.state()
    }

    /// Log in with `candidate` and load the vault.
    ///
    /// Returns an error only if the login itself failed. A failed initial
    /// load leaves the user logged in with the message in the error slot.
    pub fn login(&mut self, candidate: &str, remember: bool) -> Result<()> {
        self.gate.login(&self.service, candidate, remember)?;
        let _ = self.refresh();
        Ok(())
    }

    /// Forget the session and reset everything tied to it.
    pub fn logout(&mut self) {
        self.gate.logout();
        self.cache.reset();
        self.draft.reset();
        self.filter.category = CategoryFilter::All;
        self.revealed = None;
        self.draft_password_visible = false;
    }

    // ------------------------------------------------------------------
    // Vault operations
    // ------------------------------------------------------------------

    /// Re-fetch credentials and categories.
    pub fn refresh(&mut self) -> Result<()> {
        let result = match self.gate.master_password() {
            Some(pw) => self.cache.load(&self.service, pw),
            None => Err(PwVaultError::NotAuthenticated),
        };
        self.settle(result)
    }

    /// Submit the current draft.
    pub fn add_credential(&mut self) -> Result<()> {
        let result = match self.gate.master_password() {
            Some(pw) => self
                .cache
                .add_credential(&self.service, pw, &mut self.draft),
            None => Err(PwVaultError::NotAuthenticated),
        };
        self.settle(result)
    }

    pub fn delete_credential(&mut self, id: CredentialId) -> Result<()> {
        let result = match self.gate.master_password() {
            Some(pw) => self.cache.delete_credential(&self.service, pw, id),
            None => Err(PwVaultError::NotAuthenticated),
        };
        if result.is_ok() && self.revealed == Some(id) {
            self.revealed = None;
        }
        self.settle(result)
    }

    pub fn add_category(&mut self, name: &str) -> Result<()> {
        let result = match self.gate.master_password() {
            Some(pw) => self.cache.add_category(&self.service, pw, name),
            None => Err(PwVaultError::NotAuthenticated),
        };
        self.settle(result)
    }

    /// Fill the draft password from the service's generator.
    pub fn generate_password(&mut self) -> Result<()> {
        let result = generator::fill_draft(&self.service, &mut self.draft);
        self.settle(result)
    }

    fn settle(&mut self, result: Result<()>) -> Result<()> {
        if let Err(e) = &result {
            self.gate.error_mut().record(e);
        }
        result
    }

    // ------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------

    /// The cached credentials passing the current filter.
    pub fn visible_credentials(&self) -> impl Iterator<Item = &Credential> + Clone + '_ {
        filter(self.cache.credentials(), &self.filter)
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.filter.search_term = term.to_string();
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn filter(&self) -> &FilterPredicate {
        &self.filter
    }

    /// Show `id`'s password, or hide it if it is the one already shown.
    pub fn toggle_reveal(&mut self, id: CredentialId) {
        self.revealed = if self.revealed == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn is_revealed(&self, id: CredentialId) -> bool {
        self.revealed == Some(id)
    }

    pub fn toggle_draft_password(&mut self) {
        self.draft_password_visible = !self.draft_password_visible;
    }

    pub fn draft_password_visible(&self) -> bool {
        self.draft_password_visible
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &AuthState {
        self.gate.state()
    }

    /// The current user-facing error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.gate.error().message()
    }

    pub fn clear_error(&mut self) {
        self.gate.error_mut().clear();
    }

    pub fn cache(&self) -> &VaultCache {
        &self.cache
    }

    pub fn draft(&self) -> &DraftCredential {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftCredential {
        &mut self.draft
    }

    pub fn session_store(&self) -> &SessionStore {
        self.gate.store()
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
