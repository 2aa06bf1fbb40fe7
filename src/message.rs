//! Inbound message validation and classification
//!
//! The wire protocol is plain text: one read is one message, a leading
//! `/` marks a command, anything else is chat text to broadcast. All
//! validation runs here, before dispatch sees the message.

/// Welcome banner sent to every newly accepted client
pub const WELCOME: &[u8] = b"Welcome to Simple Chat! Use /nick <nick> to set your nick.\n";

/// Reply for a command line the relay does not understand
pub const UNSUPPORTED_COMMAND: &[u8] = b"Unsupported command\n";

/// Why an inbound message was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    TooLong,
    ControlByte,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            RejectReason::Empty => "empty message",
            RejectReason::TooLong => "message exceeds the length limit",
            RejectReason::ControlByte => "message contains control bytes",
        };
        f.write_str(reason)
    }
}

/// A validated inbound message, classified for dispatch
#[derive(Debug, PartialEq, Eq)]
pub enum ClientInput<'a> {
    /// A `/name argument` line; `arg` is None when no space follows the name
    Command { name: &'a str, arg: Option<&'a str> },
    /// Freeform chat text, broadcast verbatim (trailing newline included)
    Chat(&'a [u8]),
}

/// Check one inbound message before dispatch
///
/// A rejected message is dropped server-side; the sender is not told.
/// Any byte below 0x20 other than `\n` counts as a control byte, which
/// also keeps messages null-free.
pub fn validate(bytes: &[u8], max_len: usize) -> Result<(), RejectReason> {
    if bytes.is_empty() {
        return Err(RejectReason::Empty);
    }
    if bytes.len() > max_len {
        return Err(RejectReason::TooLong);
    }
    if bytes.iter().any(|&b| b < 0x20 && b != b'\n') {
        return Err(RejectReason::ControlByte);
    }
    Ok(())
}

/// Classify one validated message
///
/// Command lines are decoded as UTF-8; a command that does not decode is
/// reported with an empty name so it falls through to the unsupported
/// reply. Chat text stays raw bytes.
pub fn classify(bytes: &[u8]) -> ClientInput<'_> {
    if bytes.first() != Some(&b'/') {
        return ClientInput::Chat(bytes);
    }

    let Ok(line) = std::str::from_utf8(bytes) else {
        return ClientInput::Command { name: "", arg: None };
    };

    match line.split_once(' ') {
        Some((name, arg)) => ClientInput::Command {
            name,
            arg: Some(arg),
        },
        None => ClientInput::Command {
            name: line.trim_end(),
            arg: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_LEN: usize = 255;

    #[test]
    fn test_validate_accepts_plain_line() {
        assert!(validate(b"hello world\n", MAX_LEN).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_eq!(validate(b"", MAX_LEN), Err(RejectReason::Empty));
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let long = vec![b'a'; 256];
        assert_eq!(validate(&long, MAX_LEN), Err(RejectReason::TooLong));
    }

    #[test]
    fn test_validate_accepts_boundary_length() {
        let exact = vec![b'a'; 255];
        assert!(validate(&exact, MAX_LEN).is_ok());
    }

    #[test]
    fn test_validate_rejects_control_byte() {
        assert_eq!(
            validate(b"ding\x07dong\n", MAX_LEN),
            Err(RejectReason::ControlByte)
        );
        assert_eq!(
            validate(b"nul\x00here", MAX_LEN),
            Err(RejectReason::ControlByte)
        );
    }

    #[test]
    fn test_validate_allows_newline() {
        assert!(validate(b"line\n", MAX_LEN).is_ok());
    }

    #[test]
    fn test_classify_chat() {
        assert_eq!(classify(b"hello\n"), ClientInput::Chat(b"hello\n"));
    }

    #[test]
    fn test_classify_command_with_argument() {
        assert_eq!(
            classify(b"/nick alice\n"),
            ClientInput::Command {
                name: "/nick",
                arg: Some("alice\n"),
            }
        );
    }

    #[test]
    fn test_classify_command_without_argument() {
        assert_eq!(
            classify(b"/nick\n"),
            ClientInput::Command {
                name: "/nick",
                arg: None,
            }
        );
    }

    #[test]
    fn test_classify_slash_only() {
        assert_eq!(
            classify(b"/\n"),
            ClientInput::Command {
                name: "/",
                arg: None,
            }
        );
    }
}
