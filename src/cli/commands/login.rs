//! `pwvault login`: validate the master password and start a session.

use crate::cli::output;
use crate::cli::{build_app, prompt_master_password, Cli};
use crate::errors::Result;

/// Execute the `login` command.
pub fn execute(cli: &Cli, remember: bool) -> Result<()> {
    let mut app = build_app(cli)?;

    if app.startup().is_authenticated() {
        output::info("Already logged in; the saved session is still valid.");
        output::tip("Run `pwvault logout` first to switch sessions.");
        return Ok(());
    }

    let password = prompt_master_password()?;
    app.login(&password, remember)?;

    output::success(&format!(
        "Logged in. {} password(s) in the vault",
        app.cache().credentials().len()
    ));
    if let Some(msg) = app.error() {
        output::warning(msg);
    }

    if remember {
        output::tip("Session remembered. Commands will not ask again until `pwvault logout`.");
    } else {
        output::warning("Session not remembered: it ends when this command exits.");
        output::tip("Use `pwvault login --remember` or `pwvault shell` to stay logged in.");
    }

    Ok(())
}
