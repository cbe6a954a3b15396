//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status, upstream
//! - `proxy_request_duration_seconds` (histogram): latency by upstream
//!
//! # Design Decisions
//! - The `metrics` facade keeps call sites cheap; exposition is a
//!   separate concern handled by the Prometheus exporter
//! - The exporter only runs when an address is configured

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed (or synthesized) proxy response.
pub fn record_request(method: &str, status: u16, upstream: &str, start: Instant) {
    counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "upstream" => upstream.to_string()
    )
    .increment(1);
    histogram!(
        "proxy_request_duration_seconds",
        "upstream" => upstream.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
