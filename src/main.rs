use std::{ffi::OsString, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use repolist::{
    commands::workspace::{exit_status, handle_create, handle_list},
    core::{app::App, config::Config},
};

#[derive(Parser, Debug)]
#[command(name = "repolist", about = "Create and list Subversion repositories on a shared server")]
struct Cli {
    /// Configuration file (defaults to ./repolist.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List repositories, most recently committed first.
    /// Usage: list [--json]
    List {
        /// Print rows as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Create a repository with trunk/tags/branches and a README.
    /// Usage: create <name> [description] [--user <user>]
    Create {
        /// Lowercase letters, digits and hyphens only
        name: String,

        /// Stored as README.txt; prompted for when omitted on a terminal
        description: Option<OsString>,

        /// Authenticated user granted rw access
        #[arg(short, long, env = "REMOTE_USER")]
        user: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(c) => c,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::from(1) } else { ExitCode::SUCCESS };
        }
    };

    init_tracing(cli.verbose);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let app = App::new(config);

    let command_result = match &cli.command {
        Commands::List { json } => handle_list(&app, *json),
        Commands::Create { name, description, user } => {
            handle_create(&app, name, description.as_ref(), user.as_deref()).map(|_| ())
        }
    };

    ExitCode::from(exit_status(&app, command_result))
}
