//! `pwvault completions`: print a shell completion script.
//!
//! ```text
//! pwvault completions bash > ~/.local/share/bash-completion/completions/pwvault
//! pwvault completions zsh > "${fpath[1]}/_pwvault"
//! ```

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout();
    write_script(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}

/// Render the completion script for the full command tree into `out`.
fn write_script(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, out);
}
