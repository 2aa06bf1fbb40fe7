//! Command and broadcast dispatch
//!
//! Takes one validated message from a session and either mutates that
//! session's state (commands) or fans the text out to every other live
//! session. A write failure never aborts the fan-out; the failed
//! recipients are returned so the event loop can remove them once its
//! pass is complete.

use tracing::{debug, info, warn};

use crate::message::{self, ClientInput};
use crate::table::ConnectionTable;
use crate::types::ConnectionId;

/// Dispatch one message from `sender`
///
/// Returns the ids of recipients whose sockets failed during broadcast.
pub fn dispatch(
    table: &mut ConnectionTable,
    sender: ConnectionId,
    bytes: &[u8],
) -> Vec<ConnectionId> {
    match message::classify(bytes) {
        ClientInput::Command { name, arg } => {
            handle_command(table, sender, name, arg);
            Vec::new()
        }
        ClientInput::Chat(text) => broadcast(table, sender, text),
    }
}

/// Handle a `/command` line
///
/// `/nick <name>` renames the sender; the argument is trimmed but is
/// otherwise taken as-is (no length cap, charset restriction, or
/// uniqueness check). Everything else gets the unsupported reply,
/// written only to the issuer.
fn handle_command(
    table: &mut ConnectionTable,
    sender: ConnectionId,
    name: &str,
    arg: Option<&str>,
) {
    match (name, arg) {
        ("/nick", Some(arg)) => {
            let Some(session) = table.get_mut(sender) else {
                return;
            };
            let nick = arg.trim().to_string();
            info!("session {} renamed to '{}'", sender, nick);
            session.set_nick(nick);
        }
        _ => {
            debug!("unsupported command '{}' from session {}", name, sender);
            if let Some(session) = table.get(sender) {
                if let Err(e) = session.try_send(message::UNSUPPORTED_COMMAND) {
                    warn!("failed to notify session {}: {}", sender, e);
                }
            }
        }
    }
}

/// Send `text` to every session except the sender
///
/// The line on the wire is `<nick>> ` followed by the message bytes
/// exactly as received. Returns the ids of recipients whose write
/// failed; delivery to the remaining recipients continues regardless.
pub fn broadcast(table: &ConnectionTable, sender: ConnectionId, text: &[u8]) -> Vec<ConnectionId> {
    let Some(from) = table.get(sender) else {
        warn!("broadcast from unknown session {}", sender);
        return Vec::new();
    };

    let mut line = Vec::with_capacity(from.nick().len() + 2 + text.len());
    line.extend_from_slice(from.nick().as_bytes());
    line.extend_from_slice(b"> ");
    line.extend_from_slice(text);

    debug!(
        "broadcast from {}: {}",
        from.nick(),
        String::from_utf8_lossy(text).trim_end()
    );

    let mut failed = Vec::new();
    for session in table.iter() {
        if session.id() == sender {
            continue;
        }
        if let Err(e) = session.try_send(&line) {
            warn!("failed to send to session {}: {}", session.id(), e);
            failed.push(session.id());
        }
    }
    failed
}
