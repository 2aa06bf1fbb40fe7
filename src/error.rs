//! Error types for the chat relay
//!
//! Defines startup and per-connection errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Server-level errors
///
/// Only a bind failure is fatal; everything else is handled per
/// connection and leaves the event loop running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Listening socket could not be bound (fatal at startup)
    #[error("failed to bind listening socket: {0}")]
    Bind(#[source] std::io::Error),

    /// Connection table already holds the configured maximum of clients
    #[error("connection table full ({0} clients)")]
    CapacityExceeded(usize),

    /// IO error on an individual connection
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
