//! `pwvault list`: display stored credentials in a table.

use crate::cli::output;
use crate::cli::{open_authenticated, Cli};
use crate::errors::Result;
use crate::vault::{CategoryFilter, CredentialId};

/// Execute the `list` command.
pub fn execute(cli: &Cli, search: Option<&str>, category: &str, reveal: Option<u64>) -> Result<()> {
    let mut app = open_authenticated(cli)?;

    if let Some(term) = search {
        app.set_search_term(term);
    }
    app.set_category_filter(CategoryFilter::parse(category));

    if let Some(id) = reveal.map(CredentialId) {
        if app.cache().find(id).is_none() {
            output::warning(&format!("No password with id {id}; nothing to reveal."));
        }
        app.toggle_reveal(id);
    }

    output::print_credentials_table(&app);
    Ok(())
}
