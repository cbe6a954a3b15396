//! Proxy forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Matched request
//!     → forwarder.rs (rewrite URI + Host, send via shared client)
//!     → upstream response streamed back verbatim
//!     → on transport failure: error.rs (structured JSON 500)
//! ```
//!
//! # Design Decisions
//! - `forward` returns `Result`; callers never see a raw transport panic
//! - Upstream 4xx/5xx are valid responses and pass through untouched;
//!   only connection-level failures become the synthesized error
//! - Forwarders are stateless across requests: no retry, no circuit
//!   breaking, each attempt independent

pub mod error;
pub mod forwarder;

pub use error::{error_response, ErrorBody};
pub use forwarder::{ForwardError, Forwarder};
