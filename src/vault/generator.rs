//! Password generation, delegated to the remote service.

use tracing::debug;

use crate::api::VaultService;
use crate::errors::{Operation, Result};

use super::model::DraftCredential;

/// Ask the service for a new password. No policy is chosen client-side.
pub fn generate(service: &impl VaultService) -> Result<String> {
    service
        .generate_password()
        .map_err(|e| e.during(Operation::GeneratePassword))
}

/// Generate a password straight into the draft, overwriting any previous
/// value. On failure the draft password is unchanged.
pub fn fill_draft(service: &impl VaultService, draft: &mut DraftCredential) -> Result<()> {
    let password = generate(service)?;
    debug!(len = password.len(), "generated password written to draft");
    draft.password = password;
    Ok(())
}
