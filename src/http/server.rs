//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router for the configured mode
//! - Wire up middleware (CORS, request ID, tracing)
//! - Serve the health check at `/`
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;

use axum::{body::Body, http::Request, routing::get, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{ProxyConfig, ProxyMode};
use crate::http::cors::cors_layer;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::templated::register_endpoints;
use crate::http::wildcard::register_wildcard;
use crate::routing::{Resolver, ResolverError};
use crate::upstream::UpstreamClient;

/// Body served at `/`.
pub const HEALTH_MESSAGE: &str = "✅ Proxy API with CORS is running...";

/// Errors raised while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub upstream: UpstreamClient,
    pub upstream_base: Arc<str>,
    pub forward_wildcard_query: bool,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let resolver = Arc::new(Resolver::new(&config.upstream.base_url)?);
        let upstream = UpstreamClient::new(&config.upstream)?;

        let state = AppState {
            resolver,
            upstream,
            upstream_base: Arc::from(config.upstream.base_url.as_str()),
            forward_wildcard_query: config.routes.forward_wildcard_query,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let router = Router::new().route("/", get(health));

        let router = match config.mode {
            ProxyMode::Templated => register_endpoints(router, &config.routes.templated_prefix),
            ProxyMode::Wildcard => register_wildcard(router, &config.routes.wildcard_prefix),
        };

        router
            .with_state(state)
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %request.request_id(),
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                }),
            )
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
            .layer(cors_layer(&config.cors))
    }

    /// The assembled router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = %self.config.mode,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health() -> &'static str {
    HEALTH_MESSAGE
}
