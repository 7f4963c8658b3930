//! # Hex Encoding/Decoding Utilities
//!
//! Helpers for turning GSH01 frames into readable hex for logs and CLI output,
//! and for reading frames typed or pasted as hex.
//!
//! ```rust
//! use gsh01_rs::util::hex::{decode_hex, encode_hex, format_hex_compact};
//!
//! let frame = [0x04, 0x01, 0x06, 0x00, 0x00, 0x07];
//! assert_eq!(encode_hex(&frame), "040106000007");
//! assert_eq!(format_hex_compact(&frame), "04 01 06 00 00 07");
//! assert_eq!(decode_hex("04 01 06 00 00 07").unwrap(), frame);
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

impl From<HexError> for crate::error::Gsh01Error {
    fn from(_: HexError) -> Self {
        crate::error::Gsh01Error::InvalidHexString
    }
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Encode bytes to uppercase hex string
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode a hex string to bytes.
///
/// Whitespace, `:`/`-` separators and an optional leading `0x` are ignored,
/// so dumps copied from a serial monitor can be pasted as-is.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let cleaned: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }
    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "04 01 06 00" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
