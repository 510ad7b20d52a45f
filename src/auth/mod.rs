//! AuthGate: who holds a validated master password.
//!
//! ```text
//! Unknown ──startup──► Authenticated{pw}   (record present, server accepts)
//!    │                      │
//!    └──startup──► Unauthenticated ◄──logout──┘
//!                      │
//!                      └──login──► Authenticated{pw}
//! ```
//!
//! A saved session is never trusted on presence alone: startup always
//! re-validates it with the service and forgets it on any failure.

use std::fmt;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::api::VaultService;
use crate::errors::{ErrorSlot, Operation, PwVaultError, Result};
use crate::session::SessionStore;

/// Authentication state of the client.
pub enum AuthState {
    /// Startup revalidation has not finished yet.
    Unknown,
    Unauthenticated,
    Authenticated { master_password: Zeroizing<String> },
}

impl AuthState {
    fn authenticated(master_password: &str) -> Self {
        Self::Authenticated {
            master_password: Zeroizing::new(master_password.to_string()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn master_password(&self) -> Option<&str> {
        match self {
            Self::Authenticated { master_password } => Some(master_password.as_str()),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated { .. } => "authenticated",
        }
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("Unknown"),
            Self::Unauthenticated => f.write_str("Unauthenticated"),
            Self::Authenticated { .. } => {
                f.write_str("Authenticated { master_password: <redacted> }")
            }
        }
    }
}

/// The auth state machine, its session store and the single error slot.
pub struct AuthGate {
    store: SessionStore,
    state: AuthState,
    error: ErrorSlot,
}

impl AuthGate {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            state: AuthState::Unknown,
            error: ErrorSlot::default(),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn master_password(&self) -> Option<&str> {
        self.state.master_password()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn error(&self) -> &ErrorSlot {
        &self.error
    }

    pub fn error_mut(&mut self) -> &mut ErrorSlot {
        &mut self.error
    }

    /// Resolve `Unknown` from the saved session, if any.
    ///
    /// A saved record is re-validated with the service; rejection, network
    /// failure or an unreadable record all clear the store. Outside
    /// `Unknown` this is a no-op.
    pub fn startup(&mut self, service: &impl VaultService) -> &AuthState {
        if !self.state.is_unknown() {
            return &self.state;
        }

        let record = match self.store.get() {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("no saved session");
                self.state = AuthState::Unauthenticated;
                return &self.state;
            }
            Err(e) => {
                warn!(error = %e, "saved session unreadable, discarding");
                self.forget_session();
                self.state = AuthState::Unauthenticated;
                return &self.state;
            }
        };

        match service.validate_master_password(record.master_password()) {
            Ok(()) => {
                debug!(saved_at = %record.created_at(), "saved session revalidated");
                self.state = AuthState::authenticated(record.master_password());
            }
            Err(e) => {
                warn!(error = %e, "saved session failed revalidation, discarding");
                self.forget_session();
                self.state = AuthState::Unauthenticated;
            }
        }
        &self.state
    }

    /// Validate `candidate` with the service and, on success, save it.
    ///
    /// Failures land in the error slot and leave the gate unauthenticated.
    pub fn login(
        &mut self,
        service: &impl VaultService,
        candidate: &str,
        remember: bool,
    ) -> Result<()> {
        let result = self.try_login(service, candidate, remember);
        match &result {
            Ok(()) => self.error.clear(),
            Err(e) => self.error.record(e),
        }
        result
    }

    fn try_login(
        &mut self,
        service: &impl VaultService,
        candidate: &str,
        remember: bool,
    ) -> Result<()> {
        if self.state.is_authenticated() {
            return Err(PwVaultError::AlreadyAuthenticated);
        }
        self.state = AuthState::Unauthenticated;

        if candidate.is_empty() {
            return Err(PwVaultError::EmptyMasterPassword);
        }

        service
            .validate_master_password(candidate)
            .map_err(|e| e.during(Operation::Login))?;
        self.store.save(candidate, remember)?;

        debug!(remember, "login succeeded");
        self.state = AuthState::authenticated(candidate);
        Ok(())
    }

    /// Forget the session everywhere. Never fails.
    pub fn logout(&mut self) {
        self.forget_session();
        self.state = AuthState::Unauthenticated;
        self.error.clear();
    }

    fn forget_session(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear saved session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_password() {
        let state = AuthState::authenticated("hunter2");
        let shown = format!("{state:?}");
        assert!(!shown.contains("hunter2"));
        assert_eq!(format!("{:?}", AuthState::Unknown), "Unknown");
        assert_eq!(format!("{:?}", AuthState::Unauthenticated), "Unauthenticated");
    }

    #[test]
    fn master_password_only_when_authenticated() {
        assert_eq!(AuthState::Unknown.master_password(), None);
        assert_eq!(AuthState::Unauthenticated.master_password(), None);
        assert_eq!(AuthState::authenticated("pw").master_password(), Some("pw"));
        assert_eq!(AuthState::authenticated("pw").label(), "authenticated");
    }
}
