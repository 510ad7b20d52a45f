//! `pwvault generate`: print a server-generated password.

use crate::cli::{build_app, Cli};
use crate::errors::Result;

/// Execute the `generate` command.
///
/// The password is printed bare on stdout so it can be piped. No login
/// is needed: the generator endpoint is public.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut app = build_app(cli)?;
    app.generate_password()?;
    println!("{}", app.draft().password);
    Ok(())
}
