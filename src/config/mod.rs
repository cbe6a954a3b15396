//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables (API_V1_URL, API_V2_URL, PORT, ...)
//!     → loader.rs (read & apply defaults)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → passed into the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at process start and immutable thereafter;
//!   nothing reads the environment at request time
//! - Every variable has a documented default, so an empty environment
//!   yields a working local setup
//! - Validation separates syntactic (parsing) from semantic checks and
//!   reports every error, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::ListenerConfig;
pub use schema::ProxyConfig;
pub use schema::UpstreamConfig;
