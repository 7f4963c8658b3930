//! The gsh01 module contains the application layer of the GSH01 power meter:
//! the command model and builders, the frame encoder/decoder, the clock
//! encoding, the status word table and a request/response client.

pub mod builders;
pub mod client;
pub mod command;
pub mod frame;
pub mod payload;
pub mod status_word;
pub mod time;

pub use client::Gsh01Client;
pub use command::{ApplicationMode, Command, CommandKind, CommandStatus, UserIdStatus, UserIdType};
pub use frame::{decode_command, decode_frame, encode, encode_into, parse_frame, Gsh01Frame};
pub use payload::{FixedText, MeterTime, Payload};
pub use status_word::{decode_status_word, StatusBits, StatusWord, STATUS_WORD_TABLE};
pub use time::{quarter_hours_from_offset_str, timepoint_to_epoch_seconds, utc_offset_quarter_hours};
