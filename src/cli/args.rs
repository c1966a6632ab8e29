//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Larder - local state for a decentralised dependency resolver
///
/// Inspects the host's native package database and the on-disk feed cache:
/// which components are already installed, which cached feeds are stale.
#[derive(Parser, Debug)]
#[command(name = "larder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LARDER_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every feed known to the cache
    Feeds(FeedsArgs),

    /// Report whether a cached feed needs re-checking
    Stale(StaleArgs),

    /// Check whether a selection is installed on this host
    Installed(InstalledArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the feeds command
#[derive(Parser, Debug)]
pub struct FeedsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the stale command
#[derive(Parser, Debug)]
pub struct StaleArgs {
    /// Feed identifier: absolute path or URI
    pub uri: String,
}

/// Arguments for the installed command
#[derive(Parser, Debug)]
pub struct InstalledArgs {
    /// Canonical implementation id, e.g. package:deb:libfoo:1.2-1:amd64
    pub id: String,

    /// Native package name
    #[arg(short, long)]
    pub package: Option<String>,

    /// Quick-test file: existence proves installation
    #[arg(long)]
    pub quick_test_file: Option<PathBuf>,

    /// Expected mtime (integer seconds) of the quick-test file
    #[arg(long, requires = "quick_test_file")]
    pub quick_test_mtime: Option<i64>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Action to perform
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show effective configuration
    Show,
    /// Show the config file path
    Path,
}
