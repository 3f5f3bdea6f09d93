//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// modhost - module lifecycle for a modular application host
#[derive(Parser, Debug)]
#[command(name = "modhost")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to modhost.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Application root (overrides config and MODHOST_APP_ROOT)
    #[arg(long, global = true)]
    pub app_root: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered modules
    List(ListArgs),

    /// Check whether a module may be activated or deactivated
    #[command(subcommand)]
    Check(CheckCommands),

    /// Show a module's package requirements merged with the active modules
    Deps(DepsArgs),

    /// Activate a module after checking its dependencies
    Activate(ModuleArgs),

    /// Deactivate a module after checking its dependents
    Deactivate(ModuleArgs),

    /// Run both boot phases over the active modules
    Boot(BootArgs),

    /// Theme module list management
    #[command(subcommand)]
    Theme(ThemeCommands),

    /// Remove an uploaded module archive and its extracted directory
    Discard(DiscardArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only active modules
    #[arg(long)]
    pub active: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum CheckCommands {
    /// Check activation
    Install(CheckArgs),

    /// Check deactivation
    Uninstall(CheckArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Module name
    pub name: String,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DepsArgs {
    /// Module name
    pub name: String,

    /// Keep every collected version, in order, instead of a distinct set
    #[arg(long)]
    pub uninstall: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ModuleArgs {
    /// Module name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct BootArgs {
    /// Mount path handed to phase-1 entry points
    #[arg(long, default_value = "/")]
    pub mount_path: String,

    /// Server address handed to phase-2 entry points
    #[arg(long, default_value = "127.0.0.1:3000")]
    pub address: String,

    /// API router mount path handed to phase-2 entry points
    #[arg(long, default_value = "/api")]
    pub api_path: String,

    /// Authentication realm handed to phase-2 entry points
    #[arg(long, default_value = "admin")]
    pub auth_realm: String,

    /// Output per-module results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Create the theme's module list if missing
    Init(ThemeArgs),

    /// Print the theme's module list
    Show(ThemeArgs),
}

#[derive(Args, Debug)]
pub struct ThemeArgs {
    /// Theme name (defaults to current_theme from config)
    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(Args, Debug)]
pub struct DiscardArgs {
    /// Path of the uploaded .zip archive
    pub archive: Utf8PathBuf,
}
