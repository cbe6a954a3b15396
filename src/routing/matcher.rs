//! Route matching logic.
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Prefixes are segment-aligned: `/v2` matches `/v2` and `/v2/users`,
//!   never `/v2users`
//! - `/` matches every path

use axum::body::Body;
use axum::http::Request;

/// Trait for matching requests against route conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches the request path against a literal, segment-aligned prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        if self.prefix == "/" {
            return true;
        }
        match req.uri().path().strip_prefix(self.prefix.as_str()) {
            // Segment boundary: exact match or next char starts a segment.
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}
