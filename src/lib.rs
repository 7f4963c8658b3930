//! # gsh01-rs - Application Layer Codec for the GSH01 Power Meter
//!
//! The GSH01 is a certified DC power meter attached to an EV charging
//! station over a serial bus. This crate turns typed requests into the
//! meter's fixed-layout application frames and turns the meter's status
//! word into readable conditions.
//!
//! ## Features
//!
//! - Builders for every meter request: transactions, clock, bus address,
//!   metering reads, public key and OCMF records, charge point id, log
//!   entries, board mode and diagnostics
//! - Frame encoding with the declared length derived from the payload record
//! - Frame decoding for replies and for checking encoded requests
//! - UTC offsets in quarter hours, including zones like `+0530` and `+0545`
//! - Status word decoding against the meter's bit table
//! - An async client over any tokio byte channel
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! gsh01-rs = "0.1.0"
//! ```
//!
//! ```rust
//! use gsh01_rs::{decode_status_word, encode, Command};
//!
//! let frame = encode(&Command::set_bus_address(7));
//! assert_eq!(frame.len(), 6);
//!
//! for condition in decode_status_word(0x0002_0000) {
//!     println!("{condition}");
//! }
//! ```

pub mod constants;
pub mod error;
pub mod gsh01;
pub mod logging;
pub mod util;

pub use crate::error::Gsh01Error;
pub use crate::logging::{init_logger, log_error, log_info};

pub use gsh01::{
    decode_command, decode_frame, decode_status_word, encode, ApplicationMode, Command,
    CommandKind, CommandStatus, Gsh01Client, Gsh01Frame, StatusWord, UserIdStatus, UserIdType,
};
