//! Chat relay server and its event loop
//!
//! One task owns the listener and every session. Each iteration waits on
//! a single readiness call across all of them (bounded by the poll
//! timeout), then accepts at most one connection, sweeps every session
//! with a non-blocking read, and finally applies the disconnections
//! queued during the sweep. No per-connection tasks, no locks: only this
//! loop ever touches the table or writes to a socket.

use std::io;
use std::net::SocketAddr;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time;
use tracing::{debug, error, info, trace, warn};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::message;
use crate::router;
use crate::table::ConnectionTable;
use crate::transport::{self, ReadOutcome};
use crate::types::ConnectionId;

/// What woke the event loop
enum Wake {
    /// The listener produced (or failed to produce) a connection
    Incoming(io::Result<(TcpStream, SocketAddr)>),
    /// At least one session has pending input
    Readable,
    /// The poll timeout elapsed with no traffic
    Tick,
}

/// The chat relay: listener, session table, and the loop driving both
pub struct ChatServer {
    listener: TcpListener,
    table: ConnectionTable,
    config: ServerConfig,
}

impl ChatServer {
    /// Bind the listening socket
    ///
    /// A bind failure is fatal; there is nothing to relay without a port.
    pub async fn bind(addr: &str, config: ServerConfig) -> Result<Self, ServerError> {
        let listener = transport::listen(addr).await?;
        let table = ConnectionTable::new(config.max_clients);
        Ok(Self {
            listener,
            table,
            config,
        })
    }

    /// Address the listener actually bound (port 0 resolves here)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Drive the relay forever
    ///
    /// Readiness and accept errors are logged and the loop keeps going;
    /// only external process termination stops it.
    pub async fn run(mut self) {
        match self.local_addr() {
            Ok(addr) => info!("chat relay listening on {}", addr),
            Err(e) => warn!("listener address unavailable: {}", e),
        }

        loop {
            let wake = self.wait_ready().await;
            self.handle_wake(wake);
        }
    }

    /// Block, up to the poll timeout, until the listener or any live
    /// session has pending I/O
    async fn wait_ready(&self) -> Wake {
        let mut readable: FuturesUnordered<_> = self
            .table
            .iter()
            .map(|session| {
                let id = session.id();
                async move { (id, session.readable().await) }
            })
            .collect();

        tokio::select! {
            res = self.listener.accept() => Wake::Incoming(res),
            Some((id, res)) = readable.next() => {
                if let Err(e) = res {
                    // Non-fatal: the read sweep surfaces the broken
                    // socket and queues the disconnect.
                    error!("readiness wait failed for session {}: {}", id, e);
                }
                Wake::Readable
            }
            _ = time::sleep(self.config.poll_timeout) => Wake::Tick,
        }
    }

    fn handle_wake(&mut self, wake: Wake) {
        match wake {
            Wake::Incoming(Ok((stream, addr))) => {
                self.accept_connection(stream, addr);
                self.sweep_sessions();
            }
            Wake::Incoming(Err(e)) => {
                error!("accept failed: {}", e);
            }
            Wake::Readable => self.sweep_sessions(),
            Wake::Tick => {
                trace!("idle tick, {} active sessions", self.table.len());
            }
        }
    }

    /// Register one accepted connection and greet it
    fn accept_connection(&mut self, stream: TcpStream, addr: SocketAddr) {
        if let Err(e) = transport::prepare(&stream) {
            warn!("failed to configure socket from {}: {}", addr, e);
        }

        let id = match self.table.add(stream) {
            Ok(id) => id,
            Err(e) => {
                warn!("rejecting connection from {}: {}", addr, e);
                return;
            }
        };
        info!("client {} connected from {}", id, addr);

        if let Some(session) = self.table.get(id) {
            // A failed welcome is not an eviction; the next read on a
            // dead socket takes care of that.
            if let Err(e) = session.try_send(message::WELCOME) {
                warn!("failed to send welcome to client {}: {}", id, e);
            }
        }
    }

    /// Read every session that has pending data and dispatch what arrives
    ///
    /// Sessions that fail are only queued here; removal happens after the
    /// whole pass so iteration never observes a mutated table.
    fn sweep_sessions(&mut self) {
        let mut buf = vec![0u8; self.config.read_buffer_size];
        let mut disconnected: Vec<ConnectionId> = Vec::new();

        for id in self.table.ids() {
            let Some(session) = self.table.get(id) else {
                continue;
            };

            match session.try_read(&mut buf) {
                Ok(ReadOutcome::NotReady) => {}
                Ok(ReadOutcome::Closed) => {
                    info!("client {} ({}) disconnected", id, session.nick());
                    disconnected.push(id);
                }
                Ok(ReadOutcome::Data(n)) => {
                    // One read is one message; a logical line split
                    // across TCP segments arrives as two messages.
                    match message::validate(&buf[..n], self.config.max_message_len) {
                        Ok(()) => {
                            let failed = router::dispatch(&mut self.table, id, &buf[..n]);
                            disconnected.extend(failed);
                        }
                        Err(reason) => {
                            warn!("dropping message from client {}: {}", id, reason);
                        }
                    }
                }
                Err(e) => {
                    error!("read error on client {}: {}", id, e);
                    disconnected.push(id);
                }
            }
        }

        if !disconnected.is_empty() {
            disconnected.sort();
            disconnected.dedup();
            debug!("removing {} session(s) after sweep", disconnected.len());
            for id in disconnected {
                self.table.remove(id);
            }
        }
    }
}
