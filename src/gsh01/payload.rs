//! # GSH01 Payload Records
//!
//! Each request payload is a fixed-width record. Its wire length is a
//! constant of the record type, and the frame header's declared length is
//! computed from it.

use crate::constants::{GSH01_CHARGE_POINT_ID_DATA_LEN, GSH01_USER_ID_DATA_LEN};
use crate::error::Gsh01Error;
use crate::gsh01::command::{ApplicationMode, CommandKind, UserIdStatus, UserIdType};
use crate::util::packing::{insert_u32_le, read_u32_le};
use bytes::BufMut;
use nom::bytes::complete::take;
use nom::number::complete::{i8 as parse_i8, u8 as parse_u8};
use nom::IResult;
use std::fmt;

/// Text field of exactly `N` bytes.
///
/// Longer input is cut at `N` bytes, shorter input is padded with NUL bytes.
/// Neither case is an error: the meter expects fixed size frames.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedText<const N: usize>([u8; N]);

impl<const N: usize> FixedText<N> {
    pub const WIDTH: usize = N;

    pub fn new(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut field = [0u8; N];
        let len = bytes.len().min(N);
        field[..len].copy_from_slice(&bytes[..len]);
        FixedText(field)
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// The text up to the first NUL byte.
    pub fn text(&self) -> String {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(N);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl<const N: usize> fmt::Debug for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedText<{N}>({:?})", self.text())
    }
}

pub type UserIdText = FixedText<GSH01_USER_ID_DATA_LEN>;
pub type ChargePointIdText = FixedText<GSH01_CHARGE_POINT_ID_DATA_LEN>;

/// Meter clock value: epoch seconds plus the UTC offset in quarter hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeterTime {
    pub epoch_seconds: u32,
    pub utc_offset_quarter_hours: i8,
}

impl MeterTime {
    pub const WIRE_LEN: usize = 4 + 1;

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        insert_u32_le(buf, self.epoch_seconds);
        buf.put_i8(self.utc_offset_quarter_hours);
    }

    fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, epoch_seconds) = read_u32_le(input)?;
        let (input, utc_offset_quarter_hours) = parse_i8(input)?;
        Ok((
            input,
            MeterTime {
                epoch_seconds,
                utc_offset_quarter_hours,
            },
        ))
    }
}

/// START_TRANSACTION record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionStart {
    pub time: MeterTime,
    pub user_id_status: UserIdStatus,
    pub user_id_type: UserIdType,
    pub user_id: UserIdText,
}

impl TransactionStart {
    pub const WIRE_LEN: usize = MeterTime::WIRE_LEN + 1 + 1 + UserIdText::WIDTH;

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        self.time.write_to(buf);
        buf.put_u8(self.user_id_status as u8);
        buf.put_u8(self.user_id_type as u8);
        buf.put_slice(self.user_id.as_bytes());
    }
}

/// CHARGE_POINT_ID (set) record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChargePointIdentity {
    pub id_type: UserIdType,
    pub id: ChargePointIdText,
}

impl ChargePointIdentity {
    pub const WIRE_LEN: usize = 1 + ChargePointIdText::WIDTH;

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.id_type as u8);
        buf.put_slice(self.id.as_bytes());
    }
}

/// Request payload, one variant per record layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Header-only request
    Empty,
    StartTransaction(TransactionStart),
    SetTime(MeterTime),
    BusAddress(u8),
    ChargePointId(ChargePointIdentity),
    /// OCMF transaction id or 1-based log entry id
    EntryId(u32),
    ApplicationMode(ApplicationMode),
    /// Sent as a 32-bit field
    LineLossImpedance(u16),
}

impl Payload {
    /// Number of bytes [`Payload::write_to`] appends.
    pub const fn wire_len(&self) -> usize {
        match self {
            Payload::Empty => 0,
            Payload::StartTransaction(_) => TransactionStart::WIRE_LEN,
            Payload::SetTime(_) => MeterTime::WIRE_LEN,
            Payload::BusAddress(_) => 1,
            Payload::ChargePointId(_) => ChargePointIdentity::WIRE_LEN,
            Payload::EntryId(_) => 4,
            Payload::ApplicationMode(_) => 1,
            Payload::LineLossImpedance(_) => 4,
        }
    }

    pub fn write_to<B: BufMut>(&self, buf: &mut B) {
        match self {
            Payload::Empty => {}
            Payload::StartTransaction(record) => record.write_to(buf),
            Payload::SetTime(time) => time.write_to(buf),
            Payload::BusAddress(address) => buf.put_u8(*address),
            Payload::ChargePointId(record) => record.write_to(buf),
            Payload::EntryId(id) => insert_u32_le(buf, *id),
            Payload::ApplicationMode(mode) => buf.put_u8(*mode as u8),
            Payload::LineLossImpedance(impedance) => insert_u32_le(buf, u32::from(*impedance)),
        }
    }

    /// Reads the request payload of `kind` from exactly `bytes`.
    ///
    /// The layout is chosen by kind and length; a length that no request of
    /// that kind uses is rejected.
    pub fn parse(kind: CommandKind, bytes: &[u8]) -> Result<Payload, Gsh01Error> {
        let unexpected = || Gsh01Error::UnexpectedPayloadLength {
            kind: kind.to_string(),
            length: bytes.len(),
        };

        if bytes.is_empty() {
            return if kind.has_header_only_request() {
                Ok(Payload::Empty)
            } else {
                Err(unexpected())
            };
        }

        let payload = match (kind, bytes.len()) {
            (CommandKind::StartTransaction, TransactionStart::WIRE_LEN) => {
                let (rest, time) = MeterTime::parse(bytes).map_err(nom_to_error)?;
                let (rest, status) = parse_u8::<_, nom::error::Error<&[u8]>>(rest)
                    .map_err(nom_to_error)?;
                let (rest, id_type) = parse_u8::<_, nom::error::Error<&[u8]>>(rest)
                    .map_err(nom_to_error)?;
                let (_, user_id) = take::<_, _, nom::error::Error<&[u8]>>(UserIdText::WIDTH)(rest)
                    .map_err(nom_to_error)?;
                Payload::StartTransaction(TransactionStart {
                    time,
                    user_id_status: UserIdStatus::try_from(status)?,
                    user_id_type: UserIdType::try_from(id_type)?,
                    user_id: UserIdText::from_bytes(user_id),
                })
            }
            (CommandKind::Time, MeterTime::WIRE_LEN) => {
                let (_, time) = MeterTime::parse(bytes).map_err(nom_to_error)?;
                Payload::SetTime(time)
            }
            (CommandKind::MeterBusAddr, 1) => Payload::BusAddress(bytes[0]),
            (CommandKind::ChargePointId, ChargePointIdentity::WIRE_LEN) => {
                Payload::ChargePointId(ChargePointIdentity {
                    id_type: UserIdType::try_from(bytes[0])?,
                    id: ChargePointIdText::from_bytes(&bytes[1..]),
                })
            }
            (
                CommandKind::GetOcmf | CommandKind::GetLogEntry | CommandKind::GetLogEntryReverse,
                4,
            ) => {
                let (_, id) = read_u32_le(bytes).map_err(nom_to_error)?;
                Payload::EntryId(id)
            }
            (CommandKind::AppMode, 1) => Payload::ApplicationMode(ApplicationMode::try_from(bytes[0])?),
            (CommandKind::LineLossImpedance, 4) => {
                let (_, raw) = read_u32_le(bytes).map_err(nom_to_error)?;
                let impedance = u16::try_from(raw).map_err(|_| {
                    Gsh01Error::FrameParseError(format!("line loss impedance {raw} out of range"))
                })?;
                Payload::LineLossImpedance(impedance)
            }
            _ => return Err(unexpected()),
        };
        Ok(payload)
    }
}

pub(crate) fn nom_to_error(err: nom::Err<nom::error::Error<&[u8]>>) -> Gsh01Error {
    Gsh01Error::FrameParseError(format!("{err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payloads() -> Vec<Payload> {
        let time = MeterTime {
            epoch_seconds: 1_700_000_000,
            utc_offset_quarter_hours: -14,
        };
        vec![
            Payload::Empty,
            Payload::StartTransaction(TransactionStart {
                time,
                user_id_status: UserIdStatus::Assigned,
                user_id_type: UserIdType::Iso14443,
                user_id: UserIdText::new("04A2B3C4D5"),
            }),
            Payload::SetTime(time),
            Payload::BusAddress(7),
            Payload::ChargePointId(ChargePointIdentity {
                id_type: UserIdType::Evseid,
                id: ChargePointIdText::new("DE*ABC*E123"),
            }),
            Payload::EntryId(2500),
            Payload::ApplicationMode(ApplicationMode::Assembly),
            Payload::LineLossImpedance(0xBEEF),
        ]
    }

    #[test]
    fn test_wire_len_matches_written_bytes() {
        for payload in sample_payloads() {
            let mut buf = Vec::new();
            payload.write_to(&mut buf);
            assert_eq!(buf.len(), payload.wire_len(), "{payload:?}");
        }
    }

    #[test]
    fn test_record_widths() {
        assert_eq!(MeterTime::WIRE_LEN, 5);
        assert_eq!(TransactionStart::WIRE_LEN, 47);
        assert_eq!(ChargePointIdentity::WIRE_LEN, 14);
    }

    #[test]
    fn test_fixed_text_pads_and_truncates() {
        let short = FixedText::<5>::new("ab");
        assert_eq!(short.as_bytes(), &[b'a', b'b', 0, 0, 0]);
        assert_eq!(short.text(), "ab");

        let long = FixedText::<5>::new("abcdefgh");
        assert_eq!(long.as_bytes(), b"abcde");
        assert_eq!(long.text(), "abcde");

        let empty = FixedText::<3>::new("");
        assert_eq!(empty.as_bytes(), &[0, 0, 0]);
    }

    #[test]
    fn test_line_loss_impedance_is_widened() {
        let mut buf = Vec::new();
        Payload::LineLossImpedance(0x0102).write_to(&mut buf);
        assert_eq!(buf, vec![0x02, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_parse_rejects_unknown_layouts() {
        assert!(Payload::parse(CommandKind::GetOcmf, &[]).is_err());
        assert!(Payload::parse(CommandKind::StatusWord, &[0x01]).is_err());
        assert!(Payload::parse(CommandKind::Time, &[0x00; 4]).is_err());
        assert!(Payload::parse(CommandKind::AppMode, &[0x09]).is_err());
        assert!(Payload::parse(CommandKind::LineLossImpedance, &[0, 0, 1, 0]).is_err());
    }
}
