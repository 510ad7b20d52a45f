use clap::Parser;
use pwvault::cli::commands::add::AddArgs;
use pwvault::cli::{CategoryAction, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Login { remember } => pwvault::cli::commands::login::execute(&cli, remember),
        Commands::Logout => pwvault::cli::commands::logout::execute(&cli),
        Commands::Status => pwvault::cli::commands::status::execute(&cli),
        Commands::List {
            ref search,
            ref category,
            reveal,
        } => pwvault::cli::commands::list::execute(&cli, search.as_deref(), category, reveal),
        Commands::Add {
            ref name,
            ref email,
            ref url,
            category,
            ref password,
            generate,
        } => {
            let args = AddArgs {
                name,
                email,
                url: url.as_deref(),
                category,
                password: password.as_deref(),
                generate,
            };
            pwvault::cli::commands::add::execute(&cli, &args)
        }
        Commands::Delete { id, force } => pwvault::cli::commands::delete::execute(&cli, id, force),
        Commands::Category { ref action } => match action {
            CategoryAction::List => pwvault::cli::commands::category::execute_list(&cli),
            CategoryAction::Add { ref name } => {
                pwvault::cli::commands::category::execute_add(&cli, name)
            }
        },
        Commands::Generate => pwvault::cli::commands::generate::execute(&cli),
        Commands::Shell => pwvault::cli::commands::shell::execute(&cli),
        Commands::Completions { shell } => pwvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        pwvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr: `RUST_LOG` if set, `--verbose` forces debug,
/// otherwise warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
