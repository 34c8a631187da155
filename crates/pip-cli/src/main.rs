//! pipsync CLI
//!
//! Edits package installation plugin XML files and installs them into the
//! plugin table.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use context::Session;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut session = Session::open(&cli.config)?;
    execute_command(&mut session, cli.command)
}

/// `--verbose` forces debug output, otherwise `RUST_LOG` or warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{} logging already initialised", "warning:".yellow().bold());
    }
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(session: &mut Session, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { json } => commands::run_list(session, json),
        Commands::Show { identifier, json } => commands::run_show(session, &identifier, json),
        Commands::Add { name, class_name } => commands::run_add(session, &name, &class_name),
        Commands::Edit {
            identifier,
            name,
            class_name,
        } => commands::run_edit(
            session,
            &identifier,
            name.as_deref(),
            class_name.as_deref(),
        ),
        Commands::Delete { identifier } => commands::run_delete(session, &identifier),
        Commands::Sort { check } => commands::run_sort(session, check),
        Commands::Install { update } => commands::run_install(session, update),
        Commands::Uninstall => commands::run_uninstall(session),
    }
}
