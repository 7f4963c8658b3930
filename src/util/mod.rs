//! # Utility Modules
//!
//! Helpers shared by the codec, the client and the CLI: little-endian byte
//! packing, hex encoding/decoding and the serial link CRC.

pub mod crc;
pub mod hex;
pub mod packing;

// Re-export commonly used types and functions
pub use crc::crc16_xmodem;
pub use hex::{decode_hex, encode_hex, encode_hex_upper, format_hex_compact, HexError};
pub use packing::{insert_u16_le, insert_u32_le, read_u16_le, read_u32_le, read_u64_le};
