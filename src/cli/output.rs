//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::api::VaultService;
use crate::app::VaultApp;
use crate::vault::{Category, DraftCredential};

/// What a hidden password looks like on screen.
const MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the filtered credential view (ID, Name, Email, URL, Category, Password).
///
/// Passwords are masked except for the one revealed row.
pub fn print_credentials_table<S: VaultService>(app: &VaultApp<S>) {
    let total = app.cache().credentials().len();
    if total == 0 {
        info("No passwords in this vault yet.");
        tip("Run `pwvault add --name <NAME> --email <EMAIL>` to add one.");
        return;
    }

    let visible = app.visible_credentials();
    let shown = visible.clone().count();
    if shown == 0 {
        info(&format!("No passwords match the current filter ({total} stored)."));
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Email", "URL", "Category", "Password"]);

    for c in visible {
        let password = if app.is_revealed(c.id) {
            c.password.clone()
        } else {
            MASK.to_string()
        };
        table.add_row(vec![
            c.id.to_string(),
            c.name.clone(),
            c.email.clone(),
            c.url.clone().unwrap_or_default(),
            c.category_name.clone().unwrap_or_else(|| "-".to_string()),
            password,
        ]);
    }

    println!("{table}");
    info(&format!("{shown} of {total} password(s) shown"));
}

/// Print a table of categories (ID, Name).
pub fn print_categories_table(categories: &[Category]) {
    if categories.is_empty() {
        info("No categories yet.");
        tip("Run `pwvault category add <NAME>` to create one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name"]);

    for c in categories {
        table.add_row(vec![c.id.to_string(), c.name.clone()]);
    }

    println!("{table}");
}

/// Print the draft credential form.
pub fn print_draft(draft: &DraftCredential, categories: &[Category], show_password: bool) {
    let category = match draft.category_id {
        Some(id) => categories
            .iter()
            .find(|c| c.id == id)
            .map_or_else(|| id.to_string(), |c| format!("{} ({id})", c.name)),
        None => "-".to_string(),
    };
    let password = if draft.password.is_empty() {
        String::new()
    } else if show_password {
        draft.password.clone()
    } else {
        MASK.to_string()
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["name".to_string(), draft.name.clone()]);
    table.add_row(vec!["email".to_string(), draft.email.clone()]);
    table.add_row(vec!["url".to_string(), draft.url.clone()]);
    table.add_row(vec!["category".to_string(), category]);
    table.add_row(vec!["password".to_string(), password]);

    println!("{table}");
}
