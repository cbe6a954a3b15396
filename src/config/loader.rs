//! Configuration loading from the environment.

use std::num::ParseIntError;

use crate::config::schema::{ProxyConfig, UpstreamConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Base URL for the default (catch-all) upstream.
pub const ENV_API_V1_URL: &str = "API_V1_URL";
/// Base URL for the `/v2`-prefixed upstream.
pub const ENV_API_V2_URL: &str = "API_V2_URL";
/// Listen port for the proxy itself.
pub const ENV_PORT: &str = "PORT";
/// Optional bind address for the Prometheus exporter.
pub const ENV_METRICS_ADDR: &str = "METRICS_ADDR";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(ParseIntError),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort(e) => write!(f, "Invalid {ENV_PORT}: {e}"),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ProxyConfig {
    /// Load and validate configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load and validate configuration from an arbitrary variable lookup.
    ///
    /// Keeps unit tests off the process-global environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = ProxyConfig::default();

        if let Some(port) = lookup(ENV_PORT) {
            let port: u16 = port.parse().map_err(ConfigError::InvalidPort)?;
            config.listener.bind_address = format!("0.0.0.0:{port}");
        }
        if let Some(url) = lookup(ENV_API_V1_URL) {
            config.upstreams.v1 = UpstreamConfig::new(url);
        }
        if let Some(url) = lookup(ENV_API_V2_URL) {
            config.upstreams.v2 = UpstreamConfig::new(url);
        }
        config.observability.metrics_address = lookup(ENV_METRICS_ADDR);

        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_documented_defaults() {
        let config = ProxyConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3002");
        assert_eq!(config.upstreams.v1.base_url, "http://localhost:3003");
        assert_eq!(config.upstreams.v2.base_url, "http://localhost:3004");
        assert!(config.observability.metrics_address.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let config = ProxyConfig::from_lookup(lookup_from(&[
            (ENV_PORT, "8080"),
            (ENV_API_V1_URL, "http://10.0.0.1:9001"),
            (ENV_API_V2_URL, "http://10.0.0.2:9002"),
        ]))
        .unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstreams.v1.base_url, "http://10.0.0.1:9001");
        assert_eq!(config.upstreams.v2.base_url, "http://10.0.0.2:9002");
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let result = ProxyConfig::from_lookup(lookup_from(&[(ENV_PORT, "not-a-port")]));
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
    }

    #[test]
    fn invalid_upstream_url_is_rejected() {
        let result =
            ProxyConfig::from_lookup(lookup_from(&[(ENV_API_V1_URL, "not a url")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
