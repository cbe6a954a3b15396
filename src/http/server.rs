//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: `/health` plus the wildcard proxy routes
//! - Wire up middleware (request ID, tracing)
//! - Build the forwarders and the routing policy from configuration
//! - Serve with graceful shutdown (drain in-flight work on termination)

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::health::health_handler;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::proxy::forwarder::{http_client, InvalidUpstream};
use crate::proxy::{error_response, Forwarder};
use crate::routing::{PathPrefixMatcher, RouteBinding, Router as ProxyRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Builds both forwarders and freezes the routing policy: `/v2`
    /// (segment-aligned) goes to API v2, everything else to API v1.
    pub fn new(config: ProxyConfig) -> Result<Self, InvalidUpstream> {
        let client = http_client();
        let v1 = Arc::new(Forwarder::new("API v1", &config.upstreams.v1, client.clone())?);
        let v2 = Arc::new(Forwarder::new("API v2", &config.upstreams.v2, client)?);

        let proxy_router = Arc::new(ProxyRouter::new(
            vec![RouteBinding::new(PathPrefixMatcher::new("/v2"), v2)],
            RouteBinding::new(PathPrefixMatcher::new("/"), v1),
        ));

        let state = AppState {
            router: proxy_router,
        };

        Ok(Self {
            router: Self::build_router(state),
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// `/health` is registered explicitly, so it wins over the wildcard
    /// and is answered locally.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/health", any(health_handler))
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until a termination signal or a programmatic
    /// shutdown trigger, then drain in-flight requests and return.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server listening"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = signals::termination_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    }
                }
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler: match a binding, forward, translate failures.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let binding = state.router.route(&request);
    let forwarder = binding.forwarder();
    let upstream = forwarder.name().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        upstream = %upstream,
        "Proxying request"
    );

    match forwarder.forward(request).await {
        Ok(response) => {
            metrics::record_request(&method, response.status().as_u16(), &upstream, start);
            response
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream = %e.upstream(),
                error = %e,
                "Upstream request failed"
            );
            metrics::record_request(&method, 500, &upstream, start);
            error_response(&e)
        }
    }
}
