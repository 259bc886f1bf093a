//! CLI module
//!
//! Provides command-line interface for:
//! - serve: load configuration, bind, and serve until terminated
//! - check-config: validate a configuration file and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{check_config, load_config, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
