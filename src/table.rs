//! Connection table
//!
//! Owns every live session and allocates their ids. Uses HashMap for
//! O(1) lookups keyed by `ConnectionId`.

use std::collections::HashMap;

use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::error::ServerError;
use crate::session::Session;
use crate::types::ConnectionId;

/// All connected clients, keyed by connection id
///
/// Ids come from a monotonically increasing counter and are never reused
/// within one process run, so a default nick is unique among live
/// sessions.
pub struct ConnectionTable {
    /// Live sessions: ConnectionId -> Session
    sessions: HashMap<ConnectionId, Session>,
    /// Next id to hand out on accept
    next_id: u64,
    /// Maximum number of concurrent sessions allowed
    max_clients: usize,
}

impl ConnectionTable {
    /// Create an empty table with the given capacity limit
    pub fn new(max_clients: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            next_id: 1,
            max_clients,
        }
    }

    /// Register an accepted connection
    ///
    /// Fails with `CapacityExceeded` when the table is full; the caller
    /// decides what to do with the stream (dropping it closes the socket).
    pub fn add(&mut self, stream: TcpStream) -> Result<ConnectionId, ServerError> {
        if self.sessions.len() >= self.max_clients {
            return Err(ServerError::CapacityExceeded(self.max_clients));
        }

        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(id, Session::new(id, stream));
        debug!("session {} registered, {} active", id, self.sessions.len());
        Ok(id)
    }

    /// Drop a session
    ///
    /// Removing an id that is not present logs a warning and does
    /// nothing, so a disconnect intent may be applied more than once.
    pub fn remove(&mut self, id: ConnectionId) {
        match self.sessions.remove(&id) {
            Some(session) => {
                debug!(
                    "session {} ({}) removed, {} remaining",
                    id,
                    session.nick(),
                    self.sessions.len()
                );
            }
            None => {
                warn!("attempted to remove unknown session {}", id);
            }
        }
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Iterate over all live sessions
    ///
    /// Order is unspecified but stays consistent while the table is not
    /// mutated; removal during a pass must be deferred by the caller.
    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    /// Snapshot of live ids, for passes that mutate the table while walking
    pub fn ids(&self) -> Vec<ConnectionId> {
        self.sessions.keys().copied().collect()
    }

    /// Number of active sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
