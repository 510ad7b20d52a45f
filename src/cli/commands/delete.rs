//! `pwvault delete`: remove a credential from the vault.

use crate::cli::output;
use crate::cli::{confirm, open_authenticated, Cli};
use crate::errors::Result;
use crate::vault::CredentialId;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: u64, force: bool) -> Result<()> {
    let id = CredentialId(id);
    let mut app = open_authenticated(cli)?;

    let label = app
        .cache()
        .find(id)
        .map_or_else(|| format!("#{id}"), |c| format!("'{}' (#{id})", c.name));

    // Unless --force is set, ask for confirmation before deleting.
    if !force && !confirm(&format!("Delete password {label}?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    app.delete_credential(id)?;
    output::success(&format!(
        "Deleted password {label} ({} left)",
        app.cache().credentials().len()
    ));

    Ok(())
}
