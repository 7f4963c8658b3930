//! # GSH01 Status Word
//!
//! The STATUS_WORD reply is a 64-bit mask of error and status conditions.
//! [`STATUS_WORD_TABLE`] lists the known bits in a fixed order; decoding a
//! word yields the description of every listed bit that is set, in table
//! order. Bits missing from the table are ignored so newer firmware can not
//! break the decoder.
//!
//! ```rust
//! use gsh01_rs::gsh01::status_word::decode_status_word;
//!
//! assert!(decode_status_word(0).is_empty());
//! assert_eq!(decode_status_word(0x0002_0000), vec!["Status Charging"]);
//! ```

use bitflags::bitflags;
use log::{info, warn};
use serde::Serialize;

bitflags! {
    /// Known status word bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusBits: u64 {
        const ERROR_REAL_TIME_CLOCK = 0x0000_0000_0000_0001;
        const ERROR_CONFIGURATION_MEMORY = 0x0000_0000_0000_0002;
        const ERROR_SIGNATURE_MODULE = 0x0000_0000_0000_0008;
        const ERROR_METER_CONFIGURATION = 0x0000_0000_0000_0020;
        const ERROR_METER_COMMUNICATION = 0x0000_0000_0000_0040;
        const ERROR_METER_FATAL = 0x0000_0000_0000_0080;
        const ERROR_EXTERNAL_DISPLAY_NOT_AVAILABLE = 0x0000_0000_0000_0100;
        const STATUS_CLOCK_NOT_IN_SYNC = 0x0000_0000_0001_0000;
        const STATUS_CHARGING = 0x0000_0000_0002_0000;
        const STATUS_COMPENSATED_MODE_IMPEDANCE = 0x0000_0000_0008_0000;
        const STATUS_EXTERNAL_DISPLAY_USED = 0x0000_0000_0010_0000;
        const STATUS_READY_FOR_CHARGING = 0x0000_0000_0020_0000;
        const STATUS_SESSION_NOT_COMPLETED = 0x0000_0000_0040_0000;
        const STATUS_EICHLOG_FULL = 0x0000_0000_0080_0000;
        const STATUS_CHARGE_PROCESS_LIST_FULL = 0x0000_0000_0100_0000;
        const STATUS_IDENTIFICATION_BIT_OK = 0x0000_0004_0000_0000;
        const ERROR_DC_LINE_LOSS_POWER_ABNORMAL = 0x0000_0008_0000_0000;
        const FACTORY_JUMPER_SET = 0x0000_0010_0000_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Error,
    Status,
}

/// One entry of the bit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCondition {
    pub bit: StatusBits,
    pub severity: Severity,
    pub description: &'static str,
}

const fn condition(bit: StatusBits, severity: Severity, description: &'static str) -> StatusCondition {
    StatusCondition {
        bit,
        severity,
        description,
    }
}

/// Known bits, in decoding order.
pub static STATUS_WORD_TABLE: [StatusCondition; 18] = [
    condition(StatusBits::ERROR_REAL_TIME_CLOCK, Severity::Error, "Error Real time clock"),
    condition(StatusBits::ERROR_CONFIGURATION_MEMORY, Severity::Error, "Error Configuration Memory"),
    condition(StatusBits::ERROR_SIGNATURE_MODULE, Severity::Error, "Error Signature Module"),
    condition(StatusBits::ERROR_METER_CONFIGURATION, Severity::Error, "Error Meter Configuration"),
    condition(StatusBits::ERROR_METER_COMMUNICATION, Severity::Error, "Error Meter Communication"),
    condition(StatusBits::ERROR_METER_FATAL, Severity::Error, "Error Meter Fatal"),
    condition(
        StatusBits::ERROR_EXTERNAL_DISPLAY_NOT_AVAILABLE,
        Severity::Error,
        "Error External Display Not Available",
    ),
    condition(StatusBits::STATUS_CLOCK_NOT_IN_SYNC, Severity::Status, "Status Real time clock not in sync"),
    condition(StatusBits::STATUS_CHARGING, Severity::Status, "Status Charging"),
    condition(
        StatusBits::STATUS_COMPENSATED_MODE_IMPEDANCE,
        Severity::Status,
        "Status Compensated Mode Impedance",
    ),
    condition(StatusBits::STATUS_EXTERNAL_DISPLAY_USED, Severity::Status, "Status external Display used"),
    condition(StatusBits::STATUS_READY_FOR_CHARGING, Severity::Status, "Status Is Ready for Charging"),
    condition(StatusBits::STATUS_SESSION_NOT_COMPLETED, Severity::Status, "Status Session Not Completed"),
    condition(StatusBits::STATUS_EICHLOG_FULL, Severity::Status, "Status Eichlog Is Full"),
    condition(
        StatusBits::STATUS_CHARGE_PROCESS_LIST_FULL,
        Severity::Status,
        "Status Charge Process List is full",
    ),
    condition(
        StatusBits::STATUS_IDENTIFICATION_BIT_OK,
        Severity::Status,
        "Status Word Identification Bit Okay",
    ),
    condition(
        StatusBits::ERROR_DC_LINE_LOSS_POWER_ABNORMAL,
        Severity::Error,
        "Error DC Line Loss Power Abnormal",
    ),
    condition(StatusBits::FACTORY_JUMPER_SET, Severity::Status, "Factory Jumper set"),
];

/// Raw status word as read from the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct StatusWord(u64);

impl StatusWord {
    pub const fn new(raw: u64) -> Self {
        StatusWord(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Known bits that are set.
    pub fn flags(self) -> StatusBits {
        StatusBits::from_bits_truncate(self.0)
    }

    /// Set bits that are not in the table.
    pub fn unknown_bits(self) -> u64 {
        self.0 & !StatusBits::all().bits()
    }

    /// Table entries whose bit is set, in table order.
    pub fn conditions(self) -> impl Iterator<Item = &'static StatusCondition> {
        STATUS_WORD_TABLE
            .iter()
            .filter(move |entry| self.0 & entry.bit.bits() == entry.bit.bits())
    }

    pub fn descriptions(self) -> Vec<&'static str> {
        self.conditions().map(|entry| entry.description).collect()
    }

    pub fn has_errors(self) -> bool {
        self.conditions().any(|entry| entry.severity == Severity::Error)
    }

    /// Logs every set condition: errors at warn level, the rest at info.
    pub fn log_conditions(self) {
        for entry in self.conditions() {
            match entry.severity {
                Severity::Error => warn!("--> {}", entry.description),
                Severity::Status => info!("--> {}", entry.description),
            }
        }
        if self.unknown_bits() != 0 {
            info!("--> Unknown status bits 0x{:016X}", self.unknown_bits());
        }
    }
}

impl From<u64> for StatusWord {
    fn from(raw: u64) -> Self {
        StatusWord(raw)
    }
}

/// Descriptions of every known bit set in `word`, in table order.
pub fn decode_status_word(word: u64) -> Vec<&'static str> {
    StatusWord::new(word).descriptions()
}
