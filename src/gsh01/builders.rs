//! # GSH01 Command Builders
//!
//! One constructor per meter request. Builders are pure: the same arguments
//! always give the same command, and no argument is ever rejected. Text is
//! truncated or zero padded to its field width and ids are passed through
//! unchecked, the meter reports invalid ids in its reply status.
//!
//! ```rust
//! use gsh01_rs::gsh01::{encode, Command};
//!
//! let frame = encode(&Command::set_bus_address(7));
//! assert_eq!(&frame[2..], &[0x06, 0x00, 0x00, 0x07]);
//! ```

use crate::gsh01::command::{ApplicationMode, Command, CommandKind, UserIdStatus, UserIdType};
use crate::gsh01::payload::{
    ChargePointIdText, ChargePointIdentity, MeterTime, Payload, TransactionStart, UserIdText,
};
use crate::gsh01::time::{timepoint_to_epoch_seconds, utc_offset_quarter_hours};
use chrono::{DateTime, Local, TimeZone};

impl Command {
    fn header_only(kind: CommandKind) -> Self {
        Command::new(kind, Payload::Empty)
    }

    /// Header-only request of `kind`, or `None` if that kind always carries a payload.
    pub fn simple(kind: CommandKind) -> Option<Self> {
        kind.has_header_only_request()
            .then(|| Command::header_only(kind))
    }

    // ------------------------------------------------------------------
    // Transactions and clock
    // ------------------------------------------------------------------

    /// Starts a metering transaction at `timepoint`.
    ///
    /// `user_id` is cut or zero padded to 40 bytes.
    pub fn start_transaction<Tz: TimeZone>(
        timepoint: &DateTime<Tz>,
        utc_offset_quarter_hours: i8,
        user_id_status: UserIdStatus,
        user_id_type: UserIdType,
        user_id: &str,
    ) -> Self {
        let record = TransactionStart {
            time: MeterTime {
                epoch_seconds: timepoint_to_epoch_seconds(timepoint),
                utc_offset_quarter_hours,
            },
            user_id_status,
            user_id_type,
            user_id: UserIdText::new(user_id),
        };
        Command::new(CommandKind::StartTransaction, Payload::StartTransaction(record))
    }

    /// Starts a metering transaction stamped with the host clock and zone.
    pub fn start_transaction_now(
        user_id_status: UserIdStatus,
        user_id_type: UserIdType,
        user_id: &str,
    ) -> Self {
        let now = Local::now();
        Command::start_transaction(
            &now,
            utc_offset_quarter_hours(&now),
            user_id_status,
            user_id_type,
            user_id,
        )
    }

    pub fn stop_transaction() -> Self {
        Command::header_only(CommandKind::StopTransaction)
    }

    pub fn get_time() -> Self {
        Command::header_only(CommandKind::Time)
    }

    pub fn set_time<Tz: TimeZone>(timepoint: &DateTime<Tz>, utc_offset_quarter_hours: i8) -> Self {
        let time = MeterTime {
            epoch_seconds: timepoint_to_epoch_seconds(timepoint),
            utc_offset_quarter_hours,
        };
        Command::new(CommandKind::Time, Payload::SetTime(time))
    }

    pub fn get_bus_address() -> Self {
        Command::header_only(CommandKind::MeterBusAddr)
    }

    pub fn set_bus_address(bus_address: u8) -> Self {
        Command::new(CommandKind::MeterBusAddr, Payload::BusAddress(bus_address))
    }

    // ------------------------------------------------------------------
    // Instantaneous and accumulated values
    // ------------------------------------------------------------------

    pub fn get_voltage_l1() -> Self {
        Command::header_only(CommandKind::GetVoltageL1)
    }

    pub fn get_current_l1() -> Self {
        Command::header_only(CommandKind::GetCurrentL1)
    }

    pub fn get_import_power() -> Self {
        Command::header_only(CommandKind::GetImportDevPower)
    }

    pub fn get_total_import_energy() -> Self {
        Command::header_only(CommandKind::GetTotalImportDevEnergy)
    }

    pub fn get_total_power() -> Self {
        Command::header_only(CommandKind::GetTotalDevPower)
    }

    /// Import register at the start of the running or last transaction.
    pub fn get_total_start_import_energy() -> Self {
        Command::header_only(CommandKind::GetTotalStartImportDevEnergy)
    }

    /// Import register at the end of the last transaction.
    pub fn get_total_stop_import_energy() -> Self {
        Command::header_only(CommandKind::GetTotalStopImportDevEnergy)
    }

    pub fn get_transaction_duration() -> Self {
        Command::header_only(CommandKind::GetTransactTotalDuration)
    }

    // ------------------------------------------------------------------
    // Public key and OCMF records
    // ------------------------------------------------------------------

    pub fn get_pubkey_str16() -> Self {
        Command::header_only(CommandKind::GetPubkeyStr16)
    }

    pub fn get_pubkey_asn1() -> Self {
        Command::header_only(CommandKind::GetPubkeyAsn1)
    }

    pub fn get_ocmf_stats() -> Self {
        Command::header_only(CommandKind::OcmfStats)
    }

    /// OCMF record of transaction `ocmf_id` (1..=235000).
    pub fn get_ocmf(ocmf_id: u32) -> Self {
        Command::new(CommandKind::GetOcmf, Payload::EntryId(ocmf_id))
    }

    pub fn get_last_ocmf() -> Self {
        Command::header_only(CommandKind::GetLastOcmf)
    }

    // ------------------------------------------------------------------
    // Charge point identity
    // ------------------------------------------------------------------

    pub fn get_charge_point_id() -> Self {
        Command::header_only(CommandKind::ChargePointId)
    }

    /// Writes the charge point id; the meter accepts it in assembly mode only.
    ///
    /// `id` is cut or zero padded to 13 bytes.
    pub fn set_charge_point_id(id_type: UserIdType, id: &str) -> Self {
        let record = ChargePointIdentity {
            id_type,
            id: ChargePointIdText::new(id),
        };
        Command::new(CommandKind::ChargePointId, Payload::ChargePointId(record))
    }

    // ------------------------------------------------------------------
    // Log
    // ------------------------------------------------------------------

    pub fn get_log_stats() -> Self {
        Command::header_only(CommandKind::GetLogStats)
    }

    /// Log entry `log_entry_id` (1..=2500), counted from the oldest entry.
    pub fn get_log_entry(log_entry_id: u32) -> Self {
        Command::new(CommandKind::GetLogEntry, Payload::EntryId(log_entry_id))
    }

    pub fn get_last_log_entry() -> Self {
        Command::header_only(CommandKind::GetLastLogEntry)
    }

    /// Log entry counted back from the newest one: with 20 entries, id 2 is entry 18.
    pub fn get_log_entry_reverse(log_entry_id: u32) -> Self {
        Command::new(CommandKind::GetLogEntryReverse, Payload::EntryId(log_entry_id))
    }

    // ------------------------------------------------------------------
    // Board configuration
    // ------------------------------------------------------------------

    pub fn get_application_mode() -> Self {
        Command::header_only(CommandKind::AppMode)
    }

    pub fn set_application_mode(mode: ApplicationMode) -> Self {
        Command::new(CommandKind::AppMode, Payload::ApplicationMode(mode))
    }

    pub fn get_line_loss_impedance() -> Self {
        Command::header_only(CommandKind::LineLossImpedance)
    }

    pub fn set_line_loss_impedance(impedance: u16) -> Self {
        Command::new(
            CommandKind::LineLossImpedance,
            Payload::LineLossImpedance(impedance),
        )
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    pub fn get_hardware_version() -> Self {
        Command::header_only(CommandKind::HwVersion)
    }

    pub fn get_server_id() -> Self {
        Command::header_only(CommandKind::ServerId)
    }

    pub fn get_serial_number() -> Self {
        Command::header_only(CommandKind::SerialNr)
    }

    pub fn get_application_fw_version() -> Self {
        Command::header_only(CommandKind::AppFwVersion)
    }

    pub fn get_application_fw_checksum() -> Self {
        Command::header_only(CommandKind::AppFwChecksum)
    }

    pub fn get_application_fw_hash() -> Self {
        Command::header_only(CommandKind::AppFwHash)
    }

    pub fn get_status_word() -> Self {
        Command::header_only(CommandKind::StatusWord)
    }

    pub fn get_metering_fw_version() -> Self {
        Command::header_only(CommandKind::MtFwVersion)
    }

    pub fn get_metering_fw_checksum() -> Self {
        Command::header_only(CommandKind::MtFwChecksum)
    }

    pub fn get_metering_mode() -> Self {
        Command::header_only(CommandKind::MtMode)
    }

    pub fn get_bootloader_version() -> Self {
        Command::header_only(CommandKind::BootlVersion)
    }

    /// Also used as the OCMF meter model name.
    pub fn get_device_type() -> Self {
        Command::header_only(CommandKind::DeviceType)
    }
}
