//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Hold the ordered list of route bindings
//! - Select the forwarder for each incoming request
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First matching binding wins; declaration order is precedence
//! - The catch-all binding is a separate field, so `route` is total:
//!   there is no "no route" state to represent

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;

use crate::proxy::Forwarder;
use crate::routing::matcher::Matcher;

/// A (matcher, forwarder) pair: one entry in the routing policy.
#[derive(Debug)]
pub struct RouteBinding {
    matcher: Box<dyn Matcher>,
    forwarder: Arc<Forwarder>,
}

impl RouteBinding {
    pub fn new(matcher: impl Matcher + 'static, forwarder: Arc<Forwarder>) -> Self {
        Self {
            matcher: Box::new(matcher),
            forwarder,
        }
    }

    pub fn forwarder(&self) -> &Forwarder {
        &self.forwarder
    }

    fn matches(&self, req: &Request<Body>) -> bool {
        self.matcher.matches(req)
    }
}

/// Ordered routing policy over the configured forwarders.
#[derive(Debug)]
pub struct Router {
    bindings: Vec<RouteBinding>,
    catch_all: RouteBinding,
}

impl Router {
    /// Build a router from ordered bindings plus the catch-all.
    ///
    /// Bindings are evaluated in the given order; the catch-all handles
    /// anything left over.
    pub fn new(bindings: Vec<RouteBinding>, catch_all: RouteBinding) -> Self {
        Self {
            bindings,
            catch_all,
        }
    }

    /// Select the binding for a request. Never fails: the catch-all
    /// matches every path.
    pub fn route(&self, req: &Request<Body>) -> &RouteBinding {
        self.bindings
            .iter()
            .find(|binding| binding.matches(req))
            .unwrap_or(&self.catch_all)
    }
}
