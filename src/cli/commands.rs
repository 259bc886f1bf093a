//! CLI command implementations

use std::fs;
use std::path::Path;

use super::args::{Cli, Command, ServeArgs};
use super::errors::{CliError, CliResult};
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => serve(args),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Load a configuration file and validate it
pub fn load_config(path: &Path) -> CliResult<HttpServerConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

    let config: HttpServerConfig = serde_json::from_str(&content)
        .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

    config
        .validate()
        .map_err(|e| CliError::config_error(e.to_string()))?;

    Ok(config)
}

/// Builds the effective config: file (or defaults), then flag overrides
pub fn resolve_config(args: ServeArgs) -> CliResult<HttpServerConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => HttpServerConfig::default(),
    };

    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(username) = args.username {
        config.username = username;
    }
    if let Some(password) = args.password {
        config.password = password;
    }

    config
        .validate()
        .map_err(|e| CliError::config_error(e.to_string()))?;

    Ok(config)
}

/// `configstore serve`
pub fn serve(args: ServeArgs) -> CliResult<()> {
    log_event(Event::Startup);

    let config = resolve_config(args)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("addr", &config.socket_addr()), ("username", &config.username)],
    );

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime_error(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(HttpServer::with_config(config).start())?;
    Ok(())
}

/// `configstore check-config`
pub fn check_config(path: &Path) -> CliResult<()> {
    let config = load_config(path)?;
    println!("Configuration OK: listening on {}", config.socket_addr());
    Ok(())
}
