//! Request forwarding to a single upstream.

use axum::body::Body;
use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::{header, HeaderValue, Request, Response, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;

use crate::config::UpstreamConfig;

/// Shared HTTP client used by all forwarders.
pub type HttpClient = Client<HttpConnector, Body>;

/// Build the client forwarders send through.
pub fn http_client() -> HttpClient {
    Client::builder(TokioExecutor::new()).build(HttpConnector::new())
}

/// Upstream base URL rejected at forwarder construction.
#[derive(Debug, Error)]
#[error("invalid upstream base URL `{url}`: {reason}")]
pub struct InvalidUpstream {
    url: String,
    reason: String,
}

impl InvalidUpstream {
    fn new(url: &str, reason: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// A request forward that did not produce an upstream response.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The upstream connection could not be established or completed.
    #[error("{upstream} unreachable: {source}")]
    Upstream {
        upstream: String,
        source: hyper_util::client::legacy::Error,
    },
    /// The outbound request could not be assembled.
    #[error("{upstream} request rewrite failed: {reason}")]
    Rewrite { upstream: String, reason: String },
}

impl ForwardError {
    /// Display name of the upstream that failed.
    pub fn upstream(&self) -> &str {
        match self {
            ForwardError::Upstream { upstream, .. } => upstream,
            ForwardError::Rewrite { upstream, .. } => upstream,
        }
    }

    /// Underlying failure detail, including the full cause chain.
    pub fn detail(&self) -> String {
        match self {
            ForwardError::Upstream { source, .. } => {
                let mut detail = source.to_string();
                let mut cause = std::error::Error::source(source);
                while let Some(err) = cause {
                    detail.push_str(": ");
                    detail.push_str(&err.to_string());
                    cause = err.source();
                }
                detail
            }
            ForwardError::Rewrite { reason, .. } => reason.clone(),
        }
    }
}

/// Relays requests to one configured upstream.
///
/// Scheme, authority, and the rewritten Host header are resolved once at
/// construction; per-request work is limited to swapping them into the
/// inbound request.
pub struct Forwarder {
    name: String,
    scheme: Scheme,
    authority: Authority,
    host_header: HeaderValue,
    rewrite_host: bool,
    client: HttpClient,
}

impl Forwarder {
    /// Create a forwarder for the given upstream.
    pub fn new(
        name: impl Into<String>,
        config: &UpstreamConfig,
        client: HttpClient,
    ) -> Result<Self, InvalidUpstream> {
        let uri: Uri = config
            .base_url
            .parse()
            .map_err(|e| InvalidUpstream::new(&config.base_url, format!("{e}")))?;
        let scheme = uri
            .scheme()
            .cloned()
            .ok_or_else(|| InvalidUpstream::new(&config.base_url, "missing scheme"))?;
        let authority = uri
            .authority()
            .cloned()
            .ok_or_else(|| InvalidUpstream::new(&config.base_url, "missing host"))?;
        let host_header = HeaderValue::from_str(authority.as_str())
            .map_err(|_| InvalidUpstream::new(&config.base_url, "host is not a valid header value"))?;

        Ok(Self {
            name: name.into(),
            scheme,
            authority,
            host_header,
            rewrite_host: config.rewrite_host,
            client,
        })
    }

    /// Display name of this upstream (e.g. "API v1").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forward a request to the upstream and stream the response back.
    ///
    /// Method, headers, body, and the full path-and-query are preserved;
    /// only the target authority (and Host, when configured) change.
    pub async fn forward(&self, req: Request<Body>) -> Result<Response<Body>, ForwardError> {
        let (mut parts, body) = req.into_parts();

        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.scheme = Some(self.scheme.clone());
        uri_parts.authority = Some(self.authority.clone());
        if uri_parts.path_and_query.is_none() {
            uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        parts.uri = Uri::from_parts(uri_parts).map_err(|e| ForwardError::Rewrite {
            upstream: self.name.clone(),
            reason: e.to_string(),
        })?;

        if self.rewrite_host {
            parts.headers.insert(header::HOST, self.host_header.clone());
        }

        let outbound = Request::from_parts(parts, body);
        match self.client.request(outbound).await {
            Ok(response) => {
                let (parts, body) = response.into_parts();
                Ok(Response::from_parts(parts, Body::new(body)))
            }
            Err(e) => Err(ForwardError::Upstream {
                upstream: self.name.clone(),
                source: e,
            }),
        }
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("name", &self.name)
            .field("authority", &self.authority.as_str())
            .field("rewrite_host", &self.rewrite_host)
            .finish_non_exhaustive()
    }
}
