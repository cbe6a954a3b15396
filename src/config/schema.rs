//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits so tests and tooling can round-trip them.

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The two upstream API backends.
    pub upstreams: UpstreamsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3002").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3002".to_string(),
        }
    }
}

/// The pair of upstream backends requests are dispatched between.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamsConfig {
    /// Default (catch-all) upstream.
    pub v1: UpstreamConfig,

    /// Upstream for `/v2`-prefixed paths.
    pub v2: UpstreamConfig,
}

impl Default for UpstreamsConfig {
    fn default() -> Self {
        Self {
            v1: UpstreamConfig::new("http://localhost:3003"),
            v2: UpstreamConfig::new("http://localhost:3004"),
        }
    }
}

/// A single upstream backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Base URL: scheme + host + port. Paths are appended verbatim.
    pub base_url: String,

    /// Rewrite the outbound Host header to the upstream's authority.
    #[serde(default = "default_rewrite_host")]
    pub rewrite_host: bool,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            rewrite_host: true,
        }
    }
}

fn default_rewrite_host() -> bool {
    true
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Bind address for the Prometheus exporter. Exporter is disabled
    /// when unset.
    pub metrics_address: Option<String>,
}
