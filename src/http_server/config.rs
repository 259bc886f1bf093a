//! HTTP Server Configuration
//!
//! Bind address, login credentials, CORS origins, and session lifetime.
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{Credentials, SessionConfig};

/// Longest accepted session lifetime, about a century
pub const MAX_SESSION_TTL_DAYS: u32 = 36_500;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("port must be non-zero")]
    ZeroPort,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("session_ttl_days must be > 0")]
    ZeroSessionTtl,
    #[error("session_ttl_days must be at most {}", MAX_SESSION_TTL_DAYS)]
    SessionTtlTooLong,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login username (default: "whiskey")
    #[serde(default = "default_username")]
    pub username: String,

    /// Login password (default: "hotel")
    #[serde(default = "default_password")]
    pub password: String,

    /// CORS allowed origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Session lifetime in days (default: 30)
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_username() -> String {
    "whiskey".to_string()
}

fn default_password() -> String {
    "hotel".to_string()
}

fn default_session_ttl_days() -> u32 {
    30
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: default_password(),
            cors_origins: Vec::new(),
            session_ttl_days: default_session_ttl_days(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::with_ttl_days(self.session_ttl_days)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        if self.session_ttl_days == 0 {
            return Err(ConfigError::ZeroSessionTtl);
        }
        if self.session_ttl_days > MAX_SESSION_TTL_DAYS {
            return Err(ConfigError::SessionTtlTooLong);
        }
        Ok(())
    }
}
