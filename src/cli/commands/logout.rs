//! `pwvault logout`: forget the saved session.

use crate::cli::output;
use crate::cli::{build_app, Cli};
use crate::errors::Result;

/// Execute the `logout` command.
///
/// Clears both session tiers without contacting the server.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut app = build_app(cli)?;
    app.logout();
    output::success("Logged out. Saved session removed.");
    Ok(())
}
