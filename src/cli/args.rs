//! CLI argument definitions using clap
//!
//! Commands:
//! - configstore serve [--config <path>] [--host ..] [--port ..] [--username ..] [--password ..]
//! - configstore check-config --config <path>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// configstore - authenticated store of named configuration records
#[derive(Parser, Debug)]
#[command(name = "configstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Load and validate a configuration file, then exit
    CheckConfig {
        /// Path to configuration file
        #[arg(long)]
        config: PathBuf,
    },
}

/// Flags for `serve`; each one overrides the config file
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to an optional JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long)]
    pub port: Option<u16>,

    /// The username for login authentication
    #[arg(long)]
    pub username: Option<String>,

    /// The password for login authentication
    #[arg(long)]
    pub password: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
