//! `pwvault status`: re-validate the saved session and report.

use crate::cli::output;
use crate::cli::{build_app, Cli};
use crate::errors::Result;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut app = build_app(cli)?;
    // A fresh process has an empty tab tier, so any holder is the
    // persistent one.
    let holder = app.session_store().holder()?;

    output::info(&format!("Server: {}", app.service().base_url()));

    if holder.is_none() {
        output::info("No saved session.");
        output::tip("Run `pwvault login --remember` to save one.");
        return Ok(());
    }

    let authenticated = app.startup().is_authenticated();
    output::info(&format!("Session: {}", app.state().label()));

    if authenticated {
        output::success(&format!(
            "Saved session is valid ({} password(s), {} categor(ies))",
            app.cache().credentials().len(),
            app.cache().categories().len()
        ));
        if let Some(msg) = app.error() {
            output::warning(msg);
        }
    } else {
        output::warning("Saved session was rejected or the server is unreachable; it has been removed.");
        output::tip("Run `pwvault login --remember` to log in again.");
    }

    Ok(())
}
