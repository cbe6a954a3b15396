//! Configuration validation.
//!
//! Semantic checks on top of what parsing already guarantees. Pure
//! function: `ProxyConfig → Result<(), Vec<ValidationError>>`, reporting
//! every error rather than stopping at the first.

use url::Url;

use crate::config::schema::{ProxyConfig, UpstreamConfig};

/// A single semantic problem found in the configuration.
#[derive(Debug)]
pub enum ValidationError {
    /// Upstream base URL does not parse at all.
    InvalidUpstreamUrl { upstream: &'static str, reason: String },
    /// Upstream base URL parses, but its scheme is not plain HTTP.
    UnsupportedScheme { upstream: &'static str, scheme: String },
    /// Upstream base URL has no host.
    MissingHost { upstream: &'static str },
    /// Upstream base URL carries a path; paths come from the request.
    UnexpectedPath { upstream: &'static str, path: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidUpstreamUrl { upstream, reason } => {
                write!(f, "{upstream} base URL is invalid: {reason}")
            }
            ValidationError::UnsupportedScheme { upstream, scheme } => {
                write!(f, "{upstream} scheme `{scheme}` is not supported (plain http only)")
            }
            ValidationError::MissingHost { upstream } => {
                write!(f, "{upstream} base URL has no host")
            }
            ValidationError::UnexpectedPath { upstream, path } => {
                write!(f, "{upstream} base URL must not carry a path (got `{path}`)")
            }
        }
    }
}

/// Validate the full configuration, collecting all errors.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_upstream("API v1", &config.upstreams.v1, &mut errors);
    validate_upstream("API v2", &config.upstreams.v2, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_upstream(
    upstream: &'static str,
    config: &UpstreamConfig,
    errors: &mut Vec<ValidationError>,
) {
    let url = match Url::parse(&config.base_url) {
        Ok(url) => url,
        Err(e) => {
            errors.push(ValidationError::InvalidUpstreamUrl {
                upstream,
                reason: e.to_string(),
            });
            return;
        }
    };

    if url.scheme() != "http" {
        errors.push(ValidationError::UnsupportedScheme {
            upstream,
            scheme: url.scheme().to_string(),
        });
    }
    if url.host_str().is_none() {
        errors.push(ValidationError::MissingHost { upstream });
    }
    if url.path() != "/" && !url.path().is_empty() {
        errors.push(ValidationError::UnexpectedPath {
            upstream,
            path: url.path().to_string(),
        });
    }
}
