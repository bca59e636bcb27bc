//! HTTP server setup.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use keyshelf_store::CredentialStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::auth::{require_api_key, ApiKey};
use crate::handlers;
use crate::Result;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,

    /// Port number.
    pub port: u16,

    /// The API key every request must present.
    pub api_key: ApiKey,
}

impl ServerConfig {
    /// Configuration for `host:port` with the given key.
    pub fn new(host: impl Into<String>, port: u16, api_key: ApiKey) -> Self {
        Self {
            host: host.into(),
            port,
            api_key,
        }
    }
}

/// Shared, immutable request state.
pub struct AppState {
    /// The credential store adapter.
    pub store: CredentialStore,

    /// The process-wide API key.
    pub api_key: ApiKey,
}

/// The credential HTTP server.
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Create a server over `store`.
    pub fn new(config: ServerConfig, store: CredentialStore) -> Self {
        let state = Arc::new(AppState {
            store,
            api_key: config.api_key.clone(),
        });
        Self { config, state }
    }

    /// The configured API key.
    pub fn api_key(&self) -> &ApiKey {
        &self.state.api_key
    }

    /// The `host:port` string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the router. Authentication runs before routing, so unknown
    /// paths also answer 401 without a valid token. Unsupported methods on
    /// known paths answer like unknown paths.
    pub fn router(&self) -> Router {
        let state = self.state.clone();

        Router::new()
            .route(
                "/credentials",
                get(handlers::list_credentials).fallback(handlers::unknown_endpoint),
            )
            .route(
                "/credentials/:name",
                get(handlers::get_credential)
                    .post(handlers::store_credential)
                    .fallback(handlers::unknown_endpoint),
            )
            .fallback(handlers::unknown_endpoint)
            .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn run(&self) -> Result<()> {
        let listener =
            TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until Ctrl+C.
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;

        if self.state.api_key.is_ephemeral() {
            warn!("using a generated API key; it is valid only for this server instance");
        }

        info!(
            service = %self.state.store.service(),
            backend = self.state.store.backend_name(),
            "Starting credential server on http://{}",
            addr
        );
        info!("  GET  /credentials        - list credentials (masked)");
        info!("  GET  /credentials/:name  - get a credential (?reveal=true for the raw value)");
        info!("  POST /credentials/:name  - store a credential");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Stopping server...");
}
