//! Domain error types
//!
//! These errors represent business logic failures, distinct from transport
//! errors. Lifecycle operations on a session absorb them into logged no-ops;
//! the typed form exists so the phase machine's validity check stays explicit
//! and testable.

use thiserror::Error;

/// Errors raised by the session phase machine
#[derive(Debug, Error)]
pub enum SessionError {
    /// Requested phase change is not a legal edge of the lifecycle
    #[error("Invalid session phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
