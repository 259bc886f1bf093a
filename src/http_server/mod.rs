//! # HTTP Server Module
//!
//! JSON-over-HTTP front end for the config store.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/login`, `/logout` - Session flag management
//! - `/configs/*` - Collection listing, adds, and deletes (session required)
//!
//! Every request moves through decode, authorize (skipped for login and
//! logout), dispatch, respond. Any failure before dispatch ends the request
//! with the response envelope's `error` set.

pub mod auth_routes;
pub mod config;
pub mod config_routes;
pub mod cookies;
pub mod envelope;
pub mod errors;
pub mod server;
pub mod state;

pub use config::{ConfigError, HttpServerConfig};
pub use envelope::{AuthEnvelope, RequestEnvelope, ResponseEnvelope};
pub use errors::ApiError;
pub use server::HttpServer;
pub use state::{ConfigService, ListQuery};
