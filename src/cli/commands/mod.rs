//! One module per subcommand. Each exposes an `execute` function.

pub mod add;
pub mod category;
pub mod completions;
pub mod delete;
pub mod generate;
pub mod list;
pub mod login;
pub mod logout;
pub mod shell;
pub mod status;
