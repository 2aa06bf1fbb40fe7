//! Runtime configuration for the relay
//!
//! All limits ship as defaults on `ServerConfig`; only the bind address
//! can be overridden, via the first command-line argument.

use std::time::Duration;

/// Default bind address: every interface, chat port
pub const DEFAULT_ADDR: &str = "0.0.0.0:7711";

/// Server tuning knobs
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of concurrently connected clients
    pub max_clients: usize,
    /// Size of the per-session read buffer; one read is one message
    pub read_buffer_size: usize,
    /// Longest accepted inbound message, in bytes
    pub max_message_len: usize,
    /// Upper bound on one readiness wait, so the loop gets a periodic
    /// housekeeping tick even with no traffic
    pub poll_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_clients: 1000,
            read_buffer_size: 256,
            max_message_len: 255,
            poll_timeout: Duration::from_secs(1),
        }
    }
}
