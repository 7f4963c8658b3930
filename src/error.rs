//! # GSH01 Error Handling
//!
//! This module defines the Gsh01Error enum, which represents the different error
//! types that can occur in the gsh01-rs crate.
//!
//! Building and encoding commands never fails. Errors only arise when bytes or
//! text come in from the outside: received frames, offset strings, hex input,
//! command names, and the byte channel used by the client.

use thiserror::Error;

/// Represents the different error types that can occur in the GSH01 crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Gsh01Error {
    /// Indicates an error when parsing a GSH01 frame.
    #[error("Error parsing GSH01 frame: {0}")]
    FrameParseError(String),

    /// The frame announces more bytes than were received.
    #[error("Truncated frame: declared {declared} bytes, {available} available")]
    TruncatedFrame { declared: usize, available: usize },

    /// The declared length is smaller than the frame header.
    #[error("Invalid declared length: {0}")]
    InvalidDeclaredLength(u16),

    /// The command type code is not part of the command set.
    #[error("Unknown command type: 0x{0:04X}")]
    UnknownCommandType(u16),

    /// The payload size does not match any request layout of the command kind.
    #[error("Unexpected payload length {length} for {kind}")]
    UnexpectedPayloadLength { kind: String, length: usize },

    /// A UTC offset string could not be interpreted as `+hhmm`/`-hhmm`.
    #[error("Invalid UTC offset: {0}")]
    InvalidUtcOffset(String),

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string")]
    InvalidHexString,

    /// A command name did not match any command kind.
    #[error("Unknown command name: {0}")]
    UnknownCommandName(String),

    /// A byte value does not map to a variant of a protocol enumeration.
    #[error("Invalid {field} value: 0x{value:02X}")]
    InvalidEnumValue { field: &'static str, value: u8 },

    /// The meter answered with a non-OK status code.
    #[error("Command {kind} rejected by meter with status 0x{status:02X}")]
    CommandRejected { kind: String, status: u8 },

    /// The meter answered with a frame for a different command.
    #[error("Response mismatch: expected {expected}, received 0x{received:04X}")]
    ResponseMismatch { expected: String, received: u16 },

    /// Indicates an error on the byte channel.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Gsh01Error {
    fn from(err: std::io::Error) -> Self {
        Gsh01Error::Io(err.to_string())
    }
}
