//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, /health + wildcard proxy routes)
//!     → request.rs (request ID injection)
//!     → routing (prefix match) → proxy (forward)
//!     → response streamed back to client
//! ```

pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
