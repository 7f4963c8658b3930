//! GSH01 Protocol Constants
//!
//! This module defines constants used in the GSH01 application layer: frame
//! header geometry, fixed text field widths and the id ranges the meter accepts.

// ----------------------------------------------------------------------------
// Frame header
// ----------------------------------------------------------------------------

/// Width of the command type field
pub const GSH01_TYPE_FIELD_LEN: usize = 2;

/// Width of the declared length field
pub const GSH01_LENGTH_FIELD_LEN: usize = 2;

/// Width of the status field
pub const GSH01_STATUS_FIELD_LEN: usize = 1;

/// Header length: type + declared length + status
pub const GSH01_HEADER_LEN: usize =
    GSH01_TYPE_FIELD_LEN + GSH01_LENGTH_FIELD_LEN + GSH01_STATUS_FIELD_LEN;

/// Status code carried by every outbound request
pub const GSH01_STATUS_OK: u8 = 0x00;

// ----------------------------------------------------------------------------
// Fixed-width text fields (zero padded, silently truncated)
// ----------------------------------------------------------------------------

/// Identity name carried in START_TRANSACTION
pub const GSH01_USER_ID_DATA_LEN: usize = 40;

/// Charge point id carried in CHARGE_POINT_ID (set)
pub const GSH01_CHARGE_POINT_ID_DATA_LEN: usize = 13;

// ----------------------------------------------------------------------------
// Id ranges accepted by the meter (not enforced by the codec)
// ----------------------------------------------------------------------------

/// First valid OCMF transaction id
pub const GSH01_OCMF_ID_MIN: u32 = 1;

/// Last valid OCMF transaction id
pub const GSH01_OCMF_ID_MAX: u32 = 235_000;

/// First valid log entry id
pub const GSH01_LOG_ENTRY_ID_MIN: u32 = 1;

/// Last valid log entry id
pub const GSH01_LOG_ENTRY_ID_MAX: u32 = 2_500;

/// Minutes per quarter-hour offset unit
pub const GSH01_MINUTES_PER_QUARTER_HOUR: i32 = 15;
