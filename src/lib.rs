//! Minimal Multi-Client TCP Chat Relay Library
//!
//! A line-oriented chat relay: clients connect over plain TCP, optionally
//! set a nickname with `/nick`, and every chat line is broadcast to all
//! other connected clients.
//!
//! # Features
//! - Plain-text, newline-oriented wire protocol (no framing)
//! - `/nick <name>` command for renaming a session
//! - Broadcast fan-out that survives individual write failures
//! - Inbound validation (length limit, control-byte rejection)
//! - Capacity-limited connection table with deferred removal
//!
//! # Architecture
//! A single task multiplexes everything:
//! - `ChatServer` owns the listener and the `ConnectionTable` and waits
//!   on one readiness call per iteration (accept, any session readable,
//!   or a periodic tick)
//! - Ready sessions are swept with non-blocking reads and dispatched
//!   through the router; disconnects discovered mid-pass are deferred
//!   until the pass completes
//! - No locks needed - only the event loop ever touches shared state
//!
//! # Example
//! ```ignore
//! use chat_relay::{ChatServer, ServerConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let server = ChatServer::bind("0.0.0.0:7711", ServerConfig::default())
//!         .await
//!         .unwrap();
//!     server.run().await;
//! }
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod router;
pub mod server;
pub mod session;
pub mod table;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use config::{ServerConfig, DEFAULT_ADDR};
pub use error::ServerError;
pub use server::ChatServer;
pub use session::Session;
pub use table::ConnectionTable;
pub use types::ConnectionId;
