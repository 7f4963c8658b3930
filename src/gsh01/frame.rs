//! # GSH01 Frame Encoder and Decoder
//!
//! Every application layer frame has the same layout, with multi-byte fields
//! in little-endian order:
//!
//! | Offset | Width | Field                          |
//! |--------|-------|--------------------------------|
//! | 0      | 2     | command type code              |
//! | 2      | 2     | declared frame length          |
//! | 4      | 1     | status (OK on requests)        |
//! | 5      | N     | command-specific payload       |
//!
//! There is no checksum at this layer; the serial link adds its own CRC.
//!
//! Encoding a request:
//! ```rust
//! use gsh01_rs::gsh01::{encode, Command};
//!
//! let bytes = encode(&Command::get_ocmf(42));
//! assert_eq!(bytes.len(), 9);
//! assert_eq!(&bytes[2..], &[0x09, 0x00, 0x00, 42, 0, 0, 0]);
//! ```
//!
//! Decoding a reply:
//! ```rust
//! use gsh01_rs::gsh01::{decode_frame, CommandKind};
//!
//! let frame = decode_frame(&[0x07, 0x80, 0x0D, 0x00, 0x00, 0, 0, 2, 0, 0, 0, 0, 0]).unwrap();
//! assert_eq!(frame.kind(), Some(CommandKind::StatusWord));
//! assert_eq!(frame.status_word().unwrap().raw(), 0x0002_0000);
//! ```

use crate::constants::GSH01_HEADER_LEN;
use crate::error::Gsh01Error;
use crate::gsh01::command::{Command, CommandKind, CommandStatus};
use crate::gsh01::payload::{nom_to_error, Payload};
use crate::gsh01::status_word::StatusWord;
use crate::util::packing::{insert_u16_le, read_u16_le, read_u32_le, read_u64_le};
use bytes::BufMut;
use nom::bytes::complete::take;
use nom::error::{Error as NomError, ErrorKind};
use nom::number::complete::u8 as parse_u8;
use nom::{Err as NomErr, IResult};

/// Serializes a command into a request frame.
///
/// The result is always `5 + payload length` bytes long.
pub fn encode(command: &Command) -> Vec<u8> {
    let mut frame = Vec::with_capacity(usize::from(command.declared_length()));
    encode_into(command, &mut frame);
    frame
}

/// Appends the request frame of `command` to `buf`.
pub fn encode_into<B: BufMut>(command: &Command, buf: &mut B) {
    insert_u16_le(buf, command.kind().code());
    insert_u16_le(buf, command.declared_length());
    buf.put_u8(command.status().code());
    command.payload().write_to(buf);
}

/// A frame as it appears on the wire, in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gsh01Frame {
    pub command_type: u16,
    pub declared_length: u16,
    pub status: CommandStatus,
    pub payload: Vec<u8>,
}

impl Gsh01Frame {
    /// The command kind, if the type code is known.
    pub fn kind(&self) -> Option<CommandKind> {
        CommandKind::from_code(self.command_type)
    }

    pub fn is_ok(&self) -> bool {
        self.status == CommandStatus::Ok
    }

    /// First four payload bytes as a little-endian value.
    pub fn read_u32(&self) -> Result<u32, Gsh01Error> {
        read_u32_le(&self.payload)
            .map(|(_, value)| value)
            .map_err(nom_to_error)
    }

    /// First eight payload bytes as a little-endian value.
    pub fn read_u64(&self) -> Result<u64, Gsh01Error> {
        read_u64_le(&self.payload)
            .map(|(_, value)| value)
            .map_err(nom_to_error)
    }

    /// Interprets the payload of a STATUS_WORD reply.
    pub fn status_word(&self) -> Result<StatusWord, Gsh01Error> {
        self.read_u64().map(StatusWord::new)
    }

    /// Payload as text, cut at the first NUL byte.
    ///
    /// Version, serial number and device type replies are plain ASCII.
    pub fn text(&self) -> String {
        let end = self
            .payload
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(self.payload.len());
        String::from_utf8_lossy(&self.payload[..end]).into_owned()
    }
}

/// Uses the `nom` crate to parse one frame from the start of `input`.
///
/// Exactly `declared_length - 5` payload bytes are consumed; any further
/// input is returned untouched.
pub fn parse_frame(input: &[u8]) -> IResult<&[u8], Gsh01Frame> {
    let (input, command_type) = read_u16_le(input)?;
    let (input, declared_length) = read_u16_le(input)?;
    if usize::from(declared_length) < GSH01_HEADER_LEN {
        return Err(NomErr::Error(NomError::new(input, ErrorKind::Verify)));
    }
    let (input, status) = parse_u8(input)?;
    let payload_len = usize::from(declared_length) - GSH01_HEADER_LEN;
    let (input, payload) = take(payload_len)(input)?;

    Ok((
        input,
        Gsh01Frame {
            command_type,
            declared_length,
            status: CommandStatus::from_code(status),
            payload: payload.to_vec(),
        },
    ))
}

/// Decodes exactly one frame from `input`.
pub fn decode_frame(input: &[u8]) -> Result<Gsh01Frame, Gsh01Error> {
    if input.len() < GSH01_HEADER_LEN {
        return Err(Gsh01Error::TruncatedFrame {
            declared: GSH01_HEADER_LEN,
            available: input.len(),
        });
    }
    let declared = u16::from_le_bytes([input[2], input[3]]);
    if usize::from(declared) < GSH01_HEADER_LEN {
        return Err(Gsh01Error::InvalidDeclaredLength(declared));
    }
    if input.len() < usize::from(declared) {
        return Err(Gsh01Error::TruncatedFrame {
            declared: usize::from(declared),
            available: input.len(),
        });
    }

    let (rest, frame) = parse_frame(input).map_err(nom_to_error)?;
    if !rest.is_empty() {
        return Err(Gsh01Error::FrameParseError(format!(
            "{} trailing bytes after frame",
            rest.len()
        )));
    }
    Ok(frame)
}

/// Rebuilds a typed request from its encoded bytes.
///
/// `decode_command(&encode(&c))` gives back `c` for every built command.
pub fn decode_command(input: &[u8]) -> Result<Command, Gsh01Error> {
    let frame = decode_frame(input)?;
    let kind = frame
        .kind()
        .ok_or(Gsh01Error::UnknownCommandType(frame.command_type))?;
    if !frame.is_ok() {
        return Err(Gsh01Error::FrameParseError(format!(
            "request {kind} carries status 0x{:02X}",
            frame.status.code()
        )));
    }
    let payload = Payload::parse(kind, &frame.payload)?;
    Ok(Command::new(kind, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gsh01::command::{ApplicationMode, UserIdStatus, UserIdType};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_encode_header_layout() {
        let bytes = encode(&Command::get_status_word());
        assert_eq!(bytes, vec![0x07, 0x80, 0x05, 0x00, 0x00]);
    }

    #[test]
    fn test_encode_into_appends() {
        let mut buf = vec![0xAA];
        encode_into(&Command::set_bus_address(3), &mut buf);
        assert_eq!(buf, vec![0xAA, 0x04, 0x01, 0x06, 0x00, 0x00, 0x03]);
    }

    #[test]
    fn test_parse_frame_leaves_remaining_input() {
        let mut bytes = encode(&Command::get_time());
        bytes.extend_from_slice(&[0x01, 0x02]);
        let (rest, frame) = parse_frame(&bytes).unwrap();
        assert_eq!(rest, &[0x01, 0x02]);
        assert_eq!(frame.kind(), Some(CommandKind::Time));
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn test_parse_frame_rejects_short_declared_length() {
        assert!(parse_frame(&[0x03, 0x01, 0x04, 0x00, 0x00]).is_err());
    }

    #[test]
    fn test_decode_command_roundtrip() {
        let t = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let commands = vec![
            Command::start_transaction(&t, 22, UserIdStatus::Assigned, UserIdType::Iso14443, "04A1B2"),
            Command::set_time(&t, -14),
            Command::get_time(),
            Command::set_bus_address(250),
            Command::get_ocmf(235_000),
            Command::set_charge_point_id(UserIdType::Evseid, "DE*PNX*E1234"),
            Command::get_log_entry_reverse(2),
            Command::set_application_mode(ApplicationMode::Application),
            Command::set_line_loss_impedance(1234),
            Command::get_device_type(),
        ];
        for command in commands {
            let decoded = decode_command(&encode(&command)).unwrap();
            assert_eq!(decoded, command);
        }
    }

    #[test]
    fn test_decode_command_unknown_type() {
        let err = decode_command(&[0x34, 0x12, 0x05, 0x00, 0x00]).unwrap_err();
        assert_eq!(err, Gsh01Error::UnknownCommandType(0x1234));
    }

    #[test]
    fn test_frame_text() {
        let frame = Gsh01Frame {
            command_type: CommandKind::DeviceType.code(),
            declared_length: 12,
            status: CommandStatus::Ok,
            payload: b"GSH01\0\0".to_vec(),
        };
        assert_eq!(frame.text(), "GSH01");
    }
}
