//! assetline CLI - front-end asset pipeline
//!
//! Usage: assetline [COMMAND]
//!
//! Commands:
//!   build   Clean, run every task in parallel, rewrite the HTML (default)
//!   watch   Re-run tasks when their inputs change
//!   clean   Remove the output directory
//!   run     Run a single step

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::Session;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = Session::load(&cli)?;

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => commands::build::cmd_build(&session).await,
        Commands::Watch { initial } => commands::watch::cmd_watch(session, initial).await,
        Commands::Clean => commands::clean::cmd_clean(&session),
        Commands::Run { step } => commands::run::cmd_run(&session, step).await,
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
