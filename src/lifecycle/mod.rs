//! Lifecycle management subsystem.
//!
//! # States
//! ```text
//! Starting → Listening → Draining → Stopped
//!
//! Starting:  bind listener; bind failure is fatal (logged, non-zero exit)
//! Listening: accept and dispatch until a termination signal arrives
//! Draining:  stop accepting, let in-flight requests finish
//! Stopped:   all in-flight work done, process exits 0
//! ```
//!
//! # Design Decisions
//! - SIGTERM and SIGINT are treated identically: both start the drain
//! - No drain deadline: in-flight requests are never cut off
//! - Tests drive the same drain path through the `Shutdown` coordinator

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
