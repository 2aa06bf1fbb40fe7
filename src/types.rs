//! Basic type definitions for the chat relay
//!
//! Provides newtype wrappers for type safety:
//! - `ConnectionId`: unique identifier for one accepted connection

/// Unique connection identifier (newtype pattern)
///
/// Wraps the sequence number the connection table hands out when a client
/// is accepted. Implements Hash and Eq for use as HashMap keys; ids are
/// never reused within one process run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId(42).to_string(), "42");
    }

    #[test]
    fn test_connection_id_as_map_key() {
        let mut map = HashMap::new();
        map.insert(ConnectionId(1), "a");
        map.insert(ConnectionId(2), "b");

        assert_eq!(map.get(&ConnectionId(1)), Some(&"a"));
        assert_eq!(map.get(&ConnectionId(3)), None);
    }

    #[test]
    fn test_connection_id_ordering() {
        assert!(ConnectionId(1) < ConnectionId(2));
        assert_eq!(ConnectionId(7), ConnectionId(7));
    }
}
