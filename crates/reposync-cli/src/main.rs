//! reposync CLI
//!
//! Copies only the files that really changed between a generated build tree
//! and the workspace checkouts it was assembled from.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigAction};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::from_cli(&cli);

    match cli.command {
        Some(cmd) => execute_command(&ctx, cmd),
        None => {
            println!("{} Copy what changed, nothing more", "reposync".green().bold());
            println!();
            println!("Run {} for available commands.", "reposync --help".cyan());
            Ok(())
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { json } => commands::run_list(ctx, json),
        Commands::Sync {
            direction,
            repos,
            dry_run,
            json,
        } => commands::run_sync(ctx, direction.into(), &repos, dry_run, json),
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => commands::run_config_show(ctx, json),
            ConfigAction::Init { force } => commands::run_config_init(ctx, force),
        },
        Commands::Completions { shell } => {
            commands::run_completions(shell);
            Ok(())
        }
    }
}
