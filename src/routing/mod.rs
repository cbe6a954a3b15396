//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (ordered binding scan)
//!     → matcher.rs (segment-aligned prefix check)
//!     → Return: matched RouteBinding (total; catch-all always matches)
//! ```
//!
//! # Design Decisions
//! - Bindings are built at startup and immutable at runtime
//! - Declaration order is match precedence: most specific prefix first
//! - The catch-all binding is held separately, so lookup can never fail
//! - No regex, no I/O in the hot path

pub mod matcher;
pub mod router;

pub use matcher::{Matcher, PathPrefixMatcher};
pub use router::{RouteBinding, Router};
