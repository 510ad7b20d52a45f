//! `pwvault add`: store a new credential.

use crate::cli::output;
use crate::cli::{open_authenticated, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::CategoryId;

/// Field values for a new credential, as given on the command line.
pub struct AddArgs<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub url: Option<&'a str>,
    pub category: Option<u64>,
    pub password: Option<&'a str>,
    pub generate: bool,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &AddArgs<'_>) -> Result<()> {
    let mut app = open_authenticated(cli)?;

    let category_id = args.category.map(CategoryId);
    if let Some(id) = category_id {
        if !app.cache().categories().iter().any(|c| c.id == id) {
            output::tip("Run `pwvault category list` to see category ids.");
            return Err(PwVaultError::CommandFailed(format!(
                "category {id} does not exist"
            )));
        }
    }

    {
        let draft = app.draft_mut();
        draft.name = args.name.to_string();
        draft.email = args.email.to_string();
        draft.url = args.url.unwrap_or_default().to_string();
        draft.category_id = category_id;
    }

    // The password comes from one of three sources.
    if args.generate {
        app.generate_password()?;
    } else if let Some(pw) = args.password {
        output::warning("Password provided on command line; it may appear in shell history.");
        app.draft_mut().password = pw.to_string();
    } else {
        let pw = dialoguer::Password::new()
            .with_prompt(format!("Password for {}", args.name))
            .interact()
            .map_err(|e| PwVaultError::CommandFailed(format!("input prompt: {e}")))?;
        app.draft_mut().password = pw;
    }

    app.add_credential()?;

    output::success(&format!(
        "Added '{}' ({} total)",
        args.name,
        app.cache().credentials().len()
    ));
    if args.generate {
        output::tip(&format!(
            "Run `pwvault list --search {} --reveal <ID>` to see the generated password.",
            args.name
        ));
    }

    Ok(())
}
