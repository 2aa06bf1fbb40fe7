//! Session struct definition
//!
//! Server-side state for one connected client: its table key, display
//! name, and the accepted socket.

use std::io;

use tokio::net::TcpStream;

use crate::transport::{self, ReadOutcome};
use crate::types::ConnectionId;

/// One connected client
///
/// Owned exclusively by the connection table; every other component
/// refers to a session by `ConnectionId` and looks it up per use.
#[derive(Debug)]
pub struct Session {
    /// Table key for this connection
    id: ConnectionId,
    /// Display name used as the broadcast prefix
    nick: String,
    /// The accepted socket, held for the lifetime of the session
    stream: TcpStream,
}

impl Session {
    /// Create a session with its derived default nick
    pub fn new(id: ConnectionId, stream: TcpStream) -> Self {
        Self {
            id,
            nick: format!("user:{}", id),
            stream,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Current display name
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Rename this session
    ///
    /// The name is stored verbatim; trimming is the caller's concern.
    pub fn set_nick(&mut self, nick: String) {
        self.nick = nick;
    }

    /// Resolve once the socket has pending input
    pub async fn readable(&self) -> io::Result<()> {
        self.stream.readable().await
    }

    /// Attempt one non-blocking read into `buf`
    pub fn try_read(&self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
        transport::try_read(&self.stream, buf)
    }

    /// Send raw bytes to this client without blocking
    pub fn try_send(&self, bytes: &[u8]) -> io::Result<()> {
        transport::try_write_all(&self.stream, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn socket_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (server, _) = listener.accept().await.unwrap();
        // Let the reactor establish write-readiness so the first
        // non-blocking write performs its syscall instead of returning
        // WouldBlock from an unpolled readiness cache.
        server.writable().await.unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn test_default_nick_derived_from_id() {
        let (server, _client) = socket_pair().await;
        let session = Session::new(ConnectionId(7), server);

        assert_eq!(session.id(), ConnectionId(7));
        assert_eq!(session.nick(), "user:7");
    }

    #[tokio::test]
    async fn test_set_nick() {
        let (server, _client) = socket_pair().await;
        let mut session = Session::new(ConnectionId(1), server);

        session.set_nick("alice".to_string());

        assert_eq!(session.nick(), "alice");
    }

    #[tokio::test]
    async fn test_try_send_reaches_peer() {
        let (server, client) = socket_pair().await;
        let session = Session::new(ConnectionId(1), server);

        session.try_send(b"hi\n").unwrap();

        client.readable().await.unwrap();
        let mut buf = [0u8; 16];
        let n = client.try_read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"hi\n");
    }
}
