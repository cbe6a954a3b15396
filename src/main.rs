//! Versioned API Reverse Proxy
//!
//! Dispatches incoming HTTP requests to one of two upstream API backends
//! by URL path prefix, with a local health endpoint and graceful drain on
//! termination.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                  API PROXY                    │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ──────────────────▶│  │  http   │──▶│ routing  │──▶│   proxy   │──┼──▶ API v1 / v2
//!                      │  │ server  │   │ bindings │   │ forwarder │  │    upstream
//!   Client Response    │  └─────────┘   └──────────┘   └───────────┘  │
//!   ◀──────────────────┼───────────────────────────────────────────────┼── response
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐  │
//!                      │  │ config · health · observability ·       │  │
//!                      │  │ lifecycle (drain on SIGTERM/SIGINT)     │  │
//!                      │  └─────────────────────────────────────────┘  │
//!                      └───────────────────────────────────────────────┘
//! ```
//!
//! `/health` is answered locally; `/v2`-prefixed paths go to the v2
//! upstream; everything else goes to the v1 upstream. Upstream transport
//! failures become a JSON 500, never a crash of the accept loop.

use std::process::ExitCode;

use tokio::net::TcpListener;

use api_proxy::config::ProxyConfig;
use api_proxy::http::HttpServer;
use api_proxy::lifecycle::Shutdown;
use api_proxy::observability::{logging, metrics};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    tracing::info!("api-proxy v0.1.0 starting");

    let config = match ProxyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_v1_url = %config.upstreams.v1.base_url,
        api_v2_url = %config.upstreams.v2.base_url,
        "Configuration loaded"
    );

    if let Some(metrics_address) = &config.observability.metrics_address {
        if let Ok(addr) = metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                bind_address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            return ExitCode::FAILURE;
        }
    };

    let server = match HttpServer::new(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize server");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    if let Err(e) = server.run(listener, shutdown.subscribe()).await {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
