//! # HTTP Server
//!
//! Combines the auth and collection routers around one shared
//! [`ConfigService`].

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::auth_routes::auth_routes;
use super::config::HttpServerConfig;
use super::config_routes::config_routes;
use super::state::ConfigService;
use crate::observability::{log_event_with_fields, Event};

/// How often expired sessions are swept
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// HTTP server for the config store
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<ConfigService>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig) -> Self {
        let state = Arc::new(ConfigService::new(
            config.credentials(),
            config.session_config(),
        ));
        let router = Self::build_router(&config, state.clone());
        Self {
            config,
            state,
            router,
        }
    }

    /// Build the combined router
    fn build_router(config: &HttpServerConfig, state: Arc<ConfigService>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .merge(auth_routes(state.clone()))
            .merge(config_routes(state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared state (for inspection in tests)
    pub fn state(&self) -> Arc<ConfigService> {
        self.state.clone()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is terminated
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                log_event_with_fields(
                    Event::BindFailed,
                    &[("addr", &addr.to_string()), ("reason", &e.to_string())],
                );
                return Err(e);
            }
        };

        self.print_banner(addr);
        log_event_with_fields(Event::Serving, &[("addr", &addr.to_string())]);

        let state = self.state.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
            loop {
                ticker.tick().await;
                if let Ok(purged) = state.gate().purge_expired() {
                    if purged > 0 {
                        log_event_with_fields(
                            Event::SessionsPurged,
                            &[("count", &purged.to_string())],
                        );
                    }
                }
            }
        });

        axum::serve(listener, self.router).await?;

        Ok(())
    }

    fn print_banner(&self, addr: SocketAddr) {
        println!();
        println!("Listening on {}", addr);
        println!("  /login                                 [POST]");
        println!("  /logout                                [POST]");
        println!("  /configs/                              [POST,DELETE]");
        println!("  /configs/{{name,hostname,port,username}} [GET]");
        println!("  /configs/large                         [GET]");
        println!(
            "The username/password is {} / {}",
            self.config.username, self.config.password
        );
        println!();
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Liveness probe, no authentication
async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new();
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
        assert!(server.state().is_empty());
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(9000);
        let server = HttpServer::with_config(config);
        assert_eq!(server.socket_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_router_builds() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:3000".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::with_config(config).router();
    }
}
