//! modhost CLI - module lifecycle for a modular application host
//!
//! This is the main entry point for the modhost command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let global = commands::GlobalArgs {
        config: cli.config,
        app_root: cli.app_root,
    };

    match cli.command {
        Commands::List(args) => commands::list::run(args, &global).await,
        Commands::Check(cmd) => commands::check::run(cmd, &global).await,
        Commands::Deps(args) => commands::deps::run(args, &global).await,
        Commands::Activate(args) => commands::toggle::activate(args, &global).await,
        Commands::Deactivate(args) => commands::toggle::deactivate(args, &global).await,
        Commands::Boot(args) => commands::boot::run(args, &global).await,
        Commands::Theme(cmd) => commands::theme::run(cmd, &global).await,
        Commands::Discard(args) => commands::discard::run(args).await,
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // info shows the boot phase banners
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
