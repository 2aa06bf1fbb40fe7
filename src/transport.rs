//! Thin adapter over tokio's TCP primitives
//!
//! The rest of the crate touches sockets only through these helpers:
//! binding the listener, per-connection socket setup, and non-blocking
//! reads and writes. Nothing here ever blocks; waiting for readiness is
//! the event loop's job.

use std::io;

use tokio::net::{TcpListener, TcpStream};

use crate::error::ServerError;

/// Result of one non-blocking read attempt
#[derive(Debug)]
pub enum ReadOutcome {
    /// `n` bytes were read into the buffer
    Data(usize),
    /// The peer closed the connection in an orderly fashion
    Closed,
    /// The socket had no pending data
    NotReady,
}

/// Bind the listening socket
pub async fn listen(addr: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr).await.map_err(ServerError::Bind)
}

/// Per-connection socket setup
///
/// Disables Nagle so short chat lines are not batched. Tokio streams are
/// already registered as non-blocking.
pub fn prepare(stream: &TcpStream) -> io::Result<()> {
    stream.set_nodelay(true)
}

/// Attempt one read without blocking
pub fn try_read(stream: &TcpStream, buf: &mut [u8]) -> io::Result<ReadOutcome> {
    match stream.try_read(buf) {
        Ok(0) => Ok(ReadOutcome::Closed),
        Ok(n) => Ok(ReadOutcome::Data(n)),
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(ReadOutcome::NotReady),
        Err(e) => Err(e),
    }
}

/// Write the whole buffer without blocking
///
/// There is no retry or send queue: `WouldBlock` from a slow reader is
/// reported as a failure, the same as a broken pipe.
pub fn try_write_all(stream: &TcpStream, mut bytes: &[u8]) -> io::Result<()> {
    while !bytes.is_empty() {
        match stream.try_write(bytes) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(n) => bytes = &bytes[n..],
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
