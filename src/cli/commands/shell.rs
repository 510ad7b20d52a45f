//! `pwvault shell`: an interactive session.
//!
//! The shell is one long-lived client "tab": a non-remembered login lasts
//! until the shell exits, and a remembered one is re-validated silently
//! the next time any pwvault process starts. Each input line is parsed
//! with clap; `set`, `search` and `category-add` take the rest of the line
//! verbatim.

use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Confirm, Input, Password};

use crate::api::VaultService;
use crate::app::VaultApp;
use crate::cli::output;
use crate::cli::{build_app, Cli};
use crate::errors::{PwVaultError, Result};
use crate::vault::{CategoryFilter, CategoryId, CredentialId};

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "pwvault>", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShellCommand {
    /// Show passwords matching the current search and category
    #[command(alias = "ls")]
    List,

    /// Set the search term (no term clears it)
    Search {
        #[arg(default_value = "")]
        term: String,
    },

    /// Restrict the list to a category id, or `all`
    Filter { category: String },

    /// Show or hide one password in the list
    Reveal { id: u64 },

    /// List categories
    Categories,

    /// Create a category
    CategoryAdd { name: String },

    /// Set a field of the new-password draft
    Set {
        field: DraftField,
        #[arg(default_value = "")]
        value: String,
    },

    /// Generate a password into the draft
    Generate,

    /// Show the draft
    Draft,

    /// Show or hide the draft password
    ToggleDraft,

    /// Submit the draft
    Save,

    /// Discard the draft
    ClearDraft,

    /// Delete a password
    #[command(alias = "rm")]
    Delete {
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Re-fetch passwords and categories
    Refresh,

    /// Forget the session and return to the login prompt
    Logout,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DraftField {
    Name,
    Email,
    Url,
    Category,
    Password,
}

/// What the loop does after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Execute the `shell` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut app = build_app(cli)?;
    app.startup();

    if app.state().is_authenticated() {
        output::success("Saved session restored.");
    }

    loop {
        if !app.state().is_authenticated() && !login_prompt(&mut app)? {
            return Ok(());
        }
        if let Some(msg) = app.error() {
            output::warning(msg);
            app.clear_error();
        }

        let line = match read_line() {
            Ok(line) => line,
            Err(PwVaultError::UserCancelled) => return Ok(()),
            Err(e) => return Err(e),
        };
        let args = tokenize(&line);
        if args.is_empty() {
            continue;
        }

        let command = match ShellLine::try_parse_from(args) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                let _ = e.print();
                continue;
            }
        };

        match run(&mut app, command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(e) => {
                output::error(&e.to_string());
                app.clear_error();
            }
        }
    }
}

/// Ask for the master password until login succeeds.
///
/// Returns `false` when the user backs out of the prompt.
fn login_prompt<S: VaultService>(app: &mut VaultApp<S>) -> Result<bool> {
    loop {
        let password = match Password::new().with_prompt("Master password").interact() {
            Ok(pw) => zeroize::Zeroizing::new(pw),
            Err(_) => return Ok(false),
        };
        let remember = Confirm::new()
            .with_prompt("Remember me?")
            .default(false)
            .interact()
            .map_err(|_| PwVaultError::UserCancelled)?;

        match app.login(&password, remember) {
            Ok(()) => {
                output::success(&format!(
                    "Logged in ({} password(s)). Type `help` for commands.",
                    app.cache().credentials().len()
                ));
                return Ok(true);
            }
            Err(e) => output::error(&e.to_string()),
        }
    }
}

/// Split one input line into clap arguments.
///
/// Commands that take free text get the remainder of the line as a single
/// argument after `--`, so repeated spaces and leading hyphens survive.
fn tokenize(line: &str) -> Vec<String> {
    let line = line.trim_start();
    let (head, rest) = split_word(line);

    let (prefix, text) = match head {
        "search" | "category-add" => (vec![head], rest),
        "set" => {
            let (field, value) = split_word(rest.trim_start());
            (vec![head, field], value)
        }
        _ => return line.split_whitespace().map(str::to_string).collect(),
    };

    let mut args: Vec<String> = prefix
        .into_iter()
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    if !text.is_empty() {
        args.push("--".to_string());
        args.push(text.to_string());
    }
    args
}

/// The first word of `s` and everything after the one whitespace
/// character that ends it.
fn split_word(s: &str) -> (&str, &str) {
    match s.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((i, c)) => (&s[..i], &s[i + c.len_utf8()..]),
        None => (s, ""),
    }
}

fn read_line() -> Result<String> {
    Input::<String>::new()
        .with_prompt("pwvault")
        .allow_empty(true)
        .interact_text()
        .map_err(|_| PwVaultError::UserCancelled)
}

/// Run one parsed shell command against the app.
fn run<S: VaultService>(app: &mut VaultApp<S>, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::List => output::print_credentials_table(app),
        ShellCommand::Search { term } => {
            app.set_search_term(&term);
            output::print_credentials_table(app);
        }
        ShellCommand::Filter { category } => {
            app.set_category_filter(CategoryFilter::parse(&category));
            output::print_credentials_table(app);
        }
        ShellCommand::Reveal { id } => {
            let id = CredentialId(id);
            if app.cache().find(id).is_none() {
                return Err(PwVaultError::CommandFailed(format!("no password with id {id}")));
            }
            app.toggle_reveal(id);
            output::print_credentials_table(app);
        }
        ShellCommand::Categories => output::print_categories_table(app.cache().categories()),
        ShellCommand::CategoryAdd { name } => {
            app.add_category(&name)?;
            output::success(&format!("Category '{}' created", name.trim()));
        }
        ShellCommand::Set { field, value } => {
            set_draft_field(app, field, &value)?;
            print_draft(app);
        }
        ShellCommand::Generate => {
            app.generate_password()?;
            output::success("Generated password written to the draft.");
            print_draft(app);
        }
        ShellCommand::Draft => print_draft(app),
        ShellCommand::ToggleDraft => {
            app.toggle_draft_password();
            print_draft(app);
        }
        ShellCommand::Save => {
            let draft = app.draft();
            if draft.name.trim().is_empty() || draft.password.is_empty() {
                return Err(PwVaultError::CommandFailed(
                    "the draft needs at least a name and a password".into(),
                ));
            }
            let name = draft.name.clone();
            app.add_credential()?;
            output::success(&format!(
                "Added '{name}' ({} total)",
                app.cache().credentials().len()
            ));
        }
        ShellCommand::ClearDraft => {
            app.draft_mut().reset();
            output::info("Draft cleared.");
        }
        ShellCommand::Delete { id, force } => {
            let id = CredentialId(id);
            let label = app
                .cache()
                .find(id)
                .map_or_else(|| format!("#{id}"), |c| format!("'{}' (#{id})", c.name));
            if !force && !crate::cli::confirm(&format!("Delete password {label}?"))? {
                output::info("Cancelled.");
                return Ok(Flow::Continue);
            }
            app.delete_credential(id)?;
            output::success(&format!("Deleted password {label}"));
        }
        ShellCommand::Refresh => {
            app.refresh()?;
            output::success(&format!(
                "Reloaded {} password(s) and {} categor(ies)",
                app.cache().credentials().len(),
                app.cache().categories().len()
            ));
        }
        ShellCommand::Logout => {
            app.logout();
            output::success("Logged out.");
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn set_draft_field<S: VaultService>(
    app: &mut VaultApp<S>,
    field: DraftField,
    value: &str,
) -> Result<()> {
    let category = match field {
        DraftField::Category if value.trim().is_empty() || value.trim() == "none" => None,
        DraftField::Category => {
            let id: CategoryId = value.parse()?;
            if !app.cache().categories().iter().any(|c| c.id == id) {
                return Err(PwVaultError::CommandFailed(format!(
                    "category {id} does not exist"
                )));
            }
            Some(id)
        }
        _ => None,
    };

    let draft = app.draft_mut();
    match field {
        DraftField::Name => draft.name = value.to_string(),
        DraftField::Email => draft.email = value.to_string(),
        DraftField::Url => draft.url = value.to_string(),
        DraftField::Category => draft.category_id = category,
        DraftField::Password => draft.password = value.to_string(),
    }
    Ok(())
}

fn print_draft<S: VaultService>(app: &VaultApp<S>) {
    output::print_draft(
        app.draft(),
        app.cache().categories(),
        app.draft_password_visible(),
    );
}
