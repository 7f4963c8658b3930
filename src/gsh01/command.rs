//! # GSH01 Command Model
//!
//! A [`Command`] is a value: a [`CommandKind`], the status byte and a typed
//! [`Payload`] record. It is built once by one of the builders in
//! [`super::builders`], serialized by [`super::frame::encode`] and dropped.
//!
//! The declared length of a command is never stored; it is derived from the
//! payload record, so the header can not drift from the bytes that follow it.

use crate::constants::{GSH01_HEADER_LEN, GSH01_STATUS_OK};
use crate::error::Gsh01Error;
use crate::gsh01::payload::Payload;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Command type codes of the GSH01 application layer.
///
/// Get/set pairs share one code; the direction follows from the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[repr(u16)]
pub enum CommandKind {
    // Operation
    StartTransaction = 0x0101,
    StopTransaction = 0x0102,
    Time = 0x0103,
    MeterBusAddr = 0x0104,
    ChargePointId = 0x0105,
    AppMode = 0x0106,
    LineLossImpedance = 0x0107,

    // Metering
    GetVoltageL1 = 0x0201,
    GetCurrentL1 = 0x0202,
    GetImportDevPower = 0x0203,
    GetTotalImportDevEnergy = 0x0204,
    GetTotalDevPower = 0x0205,
    GetTotalStartImportDevEnergy = 0x0206,
    GetTotalStopImportDevEnergy = 0x0207,
    GetTransactTotalDuration = 0x0208,

    // Keys and OCMF transparency records
    GetPubkeyStr16 = 0x0301,
    GetPubkeyAsn1 = 0x0302,
    OcmfStats = 0x0303,
    GetOcmf = 0x0304,
    GetLastOcmf = 0x0305,

    // Log
    GetLogStats = 0x0401,
    GetLogEntry = 0x0402,
    GetLastLogEntry = 0x0403,
    GetLogEntryReverse = 0x0404,

    // Diagnostics
    HwVersion = 0x8001,
    ServerId = 0x8002,
    SerialNr = 0x8003,
    AppFwVersion = 0x8004,
    AppFwChecksum = 0x8005,
    AppFwHash = 0x8006,
    StatusWord = 0x8007,
    MtFwVersion = 0x8008,
    MtFwChecksum = 0x8009,
    MtMode = 0x800A,
    BootlVersion = 0x800B,
    DeviceType = 0x800C,
}

static COMMAND_KINDS_BY_CODE: Lazy<HashMap<u16, CommandKind>> = Lazy::new(|| {
    CommandKind::ALL
        .iter()
        .map(|kind| (kind.code(), *kind))
        .collect()
});

impl CommandKind {
    /// Every command kind, in code order.
    pub const ALL: [CommandKind; 36] = [
        CommandKind::StartTransaction,
        CommandKind::StopTransaction,
        CommandKind::Time,
        CommandKind::MeterBusAddr,
        CommandKind::ChargePointId,
        CommandKind::AppMode,
        CommandKind::LineLossImpedance,
        CommandKind::GetVoltageL1,
        CommandKind::GetCurrentL1,
        CommandKind::GetImportDevPower,
        CommandKind::GetTotalImportDevEnergy,
        CommandKind::GetTotalDevPower,
        CommandKind::GetTotalStartImportDevEnergy,
        CommandKind::GetTotalStopImportDevEnergy,
        CommandKind::GetTransactTotalDuration,
        CommandKind::GetPubkeyStr16,
        CommandKind::GetPubkeyAsn1,
        CommandKind::OcmfStats,
        CommandKind::GetOcmf,
        CommandKind::GetLastOcmf,
        CommandKind::GetLogStats,
        CommandKind::GetLogEntry,
        CommandKind::GetLastLogEntry,
        CommandKind::GetLogEntryReverse,
        CommandKind::HwVersion,
        CommandKind::ServerId,
        CommandKind::SerialNr,
        CommandKind::AppFwVersion,
        CommandKind::AppFwChecksum,
        CommandKind::AppFwHash,
        CommandKind::StatusWord,
        CommandKind::MtFwVersion,
        CommandKind::MtFwChecksum,
        CommandKind::MtMode,
        CommandKind::BootlVersion,
        CommandKind::DeviceType,
    ];

    /// The 16-bit type code sent at offset 0 of every frame.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Looks up a command kind by its type code.
    pub fn from_code(code: u16) -> Option<Self> {
        COMMAND_KINDS_BY_CODE.get(&code).copied()
    }

    /// Whether a request of this kind can be sent without a payload.
    pub const fn has_header_only_request(self) -> bool {
        !matches!(
            self,
            CommandKind::StartTransaction
                | CommandKind::GetOcmf
                | CommandKind::GetLogEntry
                | CommandKind::GetLogEntryReverse
        )
    }

    /// Protocol name of the command kind.
    pub const fn name(self) -> &'static str {
        match self {
            CommandKind::StartTransaction => "START_TRANSACTION",
            CommandKind::StopTransaction => "STOP_TRANSACTION",
            CommandKind::Time => "TIME",
            CommandKind::MeterBusAddr => "METER_BUS_ADDR",
            CommandKind::ChargePointId => "CHARGE_POINT_ID",
            CommandKind::AppMode => "APP_MODE",
            CommandKind::LineLossImpedance => "LINE_LOSS_IMPEDANCE",
            CommandKind::GetVoltageL1 => "GET_VOLTAGE_L1",
            CommandKind::GetCurrentL1 => "GET_CURRENT_L1",
            CommandKind::GetImportDevPower => "GET_IMPORT_DEV_POWER",
            CommandKind::GetTotalImportDevEnergy => "GET_TOTAL_IMPORT_DEV_ENERGY",
            CommandKind::GetTotalDevPower => "GET_TOTAL_DEV_POWER",
            CommandKind::GetTotalStartImportDevEnergy => "GET_TOTAL_START_IMPORT_DEV_ENERGY",
            CommandKind::GetTotalStopImportDevEnergy => "GET_TOTAL_STOP_IMPORT_DEV_ENERGY",
            CommandKind::GetTransactTotalDuration => "GET_TRANSACT_TOTAL_DURATION",
            CommandKind::GetPubkeyStr16 => "GET_PUBKEY_STR16",
            CommandKind::GetPubkeyAsn1 => "GET_PUBKEY_ASN1",
            CommandKind::OcmfStats => "OCMF_STATS",
            CommandKind::GetOcmf => "GET_OCMF",
            CommandKind::GetLastOcmf => "GET_LAST_OCMF",
            CommandKind::GetLogStats => "GET_LOG_STATS",
            CommandKind::GetLogEntry => "GET_LOG_ENTRY",
            CommandKind::GetLastLogEntry => "GET_LAST_LOG_ENTRY",
            CommandKind::GetLogEntryReverse => "GET_LOG_ENTRY_REVERSE",
            CommandKind::HwVersion => "HW_VERSION",
            CommandKind::ServerId => "SERVER_ID",
            CommandKind::SerialNr => "SERIAL_NR",
            CommandKind::AppFwVersion => "APP_FW_VERSION",
            CommandKind::AppFwChecksum => "APP_FW_CHECKSUM",
            CommandKind::AppFwHash => "APP_FW_HASH",
            CommandKind::StatusWord => "STATUS_WORD",
            CommandKind::MtFwVersion => "MT_FW_VERSION",
            CommandKind::MtFwChecksum => "MT_FW_CHECKSUM",
            CommandKind::MtMode => "MT_MODE",
            CommandKind::BootlVersion => "BOOTL_VERSION",
            CommandKind::DeviceType => "DEVICE_TYPE",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `STATUS_WORD`, `status_word` and `status-word`.
impl FromStr for CommandKind {
    type Err = Gsh01Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        CommandKind::ALL
            .iter()
            .find(|kind| kind.name() == normalized)
            .copied()
            .ok_or_else(|| Gsh01Error::UnknownCommandName(s.to_string()))
    }
}

/// Status byte at offset 4 of a frame.
///
/// Requests always carry `Ok`; any other code only appears in replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommandStatus {
    Ok,
    Failed(u8),
}

impl CommandStatus {
    pub const fn from_code(code: u8) -> Self {
        if code == GSH01_STATUS_OK {
            CommandStatus::Ok
        } else {
            CommandStatus::Failed(code)
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            CommandStatus::Ok => GSH01_STATUS_OK,
            CommandStatus::Failed(code) => code,
        }
    }
}

/// How the identity of a START_TRANSACTION was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[repr(u8)]
pub enum UserIdStatus {
    NotAssigned = 0x00,
    Assigned = 0x01,
}

impl TryFrom<u8> for UserIdStatus {
    type Error = Gsh01Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(UserIdStatus::NotAssigned),
            0x01 => Ok(UserIdStatus::Assigned),
            _ => Err(Gsh01Error::InvalidEnumValue {
                field: "user id status",
                value,
            }),
        }
    }
}

/// Identification medium, following the OCMF identification types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[repr(u8)]
pub enum UserIdType {
    None = 0x00,
    Denied = 0x01,
    Undefined = 0x02,
    /// Contactless card UID
    Iso14443 = 0x0A,
    Iso15693 = 0x0B,
    Emaid = 0x14,
    Evccid = 0x15,
    Evseid = 0x1E,
    PhoneNumber = 0x28,
    KeyCode = 0x32,
    CardTxnNr = 0x3C,
}

impl TryFrom<u8> for UserIdType {
    type Error = Gsh01Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let id_type = match value {
            0x00 => UserIdType::None,
            0x01 => UserIdType::Denied,
            0x02 => UserIdType::Undefined,
            0x0A => UserIdType::Iso14443,
            0x0B => UserIdType::Iso15693,
            0x14 => UserIdType::Emaid,
            0x15 => UserIdType::Evccid,
            0x1E => UserIdType::Evseid,
            0x28 => UserIdType::PhoneNumber,
            0x32 => UserIdType::KeyCode,
            0x3C => UserIdType::CardTxnNr,
            _ => {
                return Err(Gsh01Error::InvalidEnumValue {
                    field: "user id type",
                    value,
                })
            }
        };
        Ok(id_type)
    }
}

/// Operating mode of the application board.
///
/// The charge point id can only be written in assembly mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[repr(u8)]
pub enum ApplicationMode {
    Application = 0x00,
    Assembly = 0x01,
}

impl TryFrom<u8> for ApplicationMode {
    type Error = Gsh01Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(ApplicationMode::Application),
            0x01 => Ok(ApplicationMode::Assembly),
            _ => Err(Gsh01Error::InvalidEnumValue {
                field: "application mode",
                value,
            }),
        }
    }
}

/// One GSH01 request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    status: CommandStatus,
    payload: Payload,
}

impl Command {
    pub(crate) fn new(kind: CommandKind, payload: Payload) -> Self {
        Command {
            kind,
            status: CommandStatus::Ok,
            payload,
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn status(&self) -> CommandStatus {
        self.status
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Number of payload bytes following the header.
    pub fn payload_len(&self) -> usize {
        self.payload.wire_len()
    }

    /// Total frame length announced in the header.
    pub fn declared_length(&self) -> u16 {
        (GSH01_HEADER_LEN + self.payload_len()) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        assert_eq!(COMMAND_KINDS_BY_CODE.len(), CommandKind::ALL.len());
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(CommandKind::from_code(0xFFFF), None);
    }

    #[test]
    fn test_name_parsing() {
        for kind in CommandKind::ALL {
            assert_eq!(kind.name().parse::<CommandKind>().unwrap(), kind);
            let kebab = kind.name().to_ascii_lowercase().replace('_', "-");
            assert_eq!(kebab.parse::<CommandKind>().unwrap(), kind);
        }
        assert!("GET_EVERYTHING".parse::<CommandKind>().is_err());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CommandStatus::from_code(0x00), CommandStatus::Ok);
        assert_eq!(CommandStatus::from_code(0x07), CommandStatus::Failed(0x07));
        assert_eq!(CommandStatus::Failed(0x07).code(), 0x07);
        assert_eq!(CommandStatus::Ok.code(), 0x00);
    }

    #[test]
    fn test_enum_byte_roundtrip() {
        for value in 0..=u8::MAX {
            if let Ok(id_type) = UserIdType::try_from(value) {
                assert_eq!(id_type as u8, value);
            }
            if let Ok(status) = UserIdStatus::try_from(value) {
                assert_eq!(status as u8, value);
            }
            if let Ok(mode) = ApplicationMode::try_from(value) {
                assert_eq!(mode as u8, value);
            }
        }
        assert!(UserIdType::try_from(0xFF).is_err());
    }
}
