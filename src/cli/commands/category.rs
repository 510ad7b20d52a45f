//! `pwvault category`: list and create categories.

use crate::cli::output;
use crate::cli::{open_authenticated, Cli};
use crate::errors::Result;

/// Execute `pwvault category list`.
pub fn execute_list(cli: &Cli) -> Result<()> {
    let app = open_authenticated(cli)?;
    output::print_categories_table(app.cache().categories());
    Ok(())
}

/// Execute `pwvault category add <NAME>`.
pub fn execute_add(cli: &Cli, name: &str) -> Result<()> {
    let mut app = open_authenticated(cli)?;
    app.add_category(name)?;

    let created = app
        .cache()
        .categories()
        .iter()
        .rev()
        .find(|c| c.name == name.trim());
    match created {
        Some(c) => output::success(&format!("Category '{}' created with id {}", c.name, c.id)),
        None => output::success(&format!("Category '{}' created", name.trim())),
    }

    Ok(())
}
