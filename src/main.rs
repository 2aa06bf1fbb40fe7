//! Minimal TCP Chat Relay - Entry Point
//!
//! Binds the listening socket and drives the single-task event loop.

use std::env;

use tracing_subscriber::EnvFilter;

use chat_relay::{ChatServer, ServerConfig, DEFAULT_ADDR};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=chat_relay=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_relay=info")),
        )
        .init();

    // Get bind address from command line or use default
    let addr = env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDR.to_string());

    // A bind failure is fatal and exits with a diagnostic
    let server = ChatServer::bind(&addr, ServerConfig::default()).await?;

    server.run().await;

    Ok(())
}
