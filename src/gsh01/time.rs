//! # Meter Time Encoding
//!
//! The GSH01 clock is set with a 32-bit count of seconds since the Unix epoch
//! plus a signed UTC offset counted in quarter hours, so zones such as
//! `+0530` or `+0545` are representable.
//!
//! ```rust
//! use gsh01_rs::gsh01::time::quarter_hours_from_offset_str;
//!
//! assert_eq!(quarter_hours_from_offset_str("+0200").unwrap(), 8);
//! assert_eq!(quarter_hours_from_offset_str("+0530").unwrap(), 22);
//! assert_eq!(quarter_hours_from_offset_str("-0330").unwrap(), -14);
//! ```

use crate::constants::GSH01_MINUTES_PER_QUARTER_HOUR;
use crate::error::Gsh01Error;
use chrono::{DateTime, Local, Offset, TimeZone};

/// Truncates a timestamp to whole seconds since the Unix epoch.
///
/// The result is narrowed to 32 bits and wraps past 2106-02-07.
pub fn timepoint_to_epoch_seconds<Tz: TimeZone>(timepoint: &DateTime<Tz>) -> u32 {
    timepoint.timestamp() as u32
}

/// Returns the UTC offset of `local_time` in signed quarter hours.
pub fn utc_offset_quarter_hours<Tz: TimeZone>(local_time: &DateTime<Tz>) -> i8 {
    let offset_minutes = local_time.offset().fix().local_minus_utc() / 60;
    let hhmm = (offset_minutes / 60) * 100 + offset_minutes % 60;
    quarter_hours_from_hhmm(hhmm)
}

/// Returns the UTC offset of the host's local timezone right now.
pub fn local_utc_offset_quarter_hours() -> i8 {
    utc_offset_quarter_hours(&Local::now())
}

/// Converts a numeric `±hhmm` offset (as printed by `%z`) to quarter hours.
///
/// Minutes that are a whole number of hours are folded into the hour part
/// before dividing by 15; the remaining minutes truncate towards zero.
pub fn quarter_hours_from_hhmm(hhmm: i32) -> i8 {
    let mut hours = hhmm / 100;
    let mut minutes = hhmm % 100;

    let extra_hours = minutes / 60;
    if extra_hours != 0 {
        hours += extra_hours;
        minutes -= extra_hours * 60;
    }

    (hours * 4 + minutes / GSH01_MINUTES_PER_QUARTER_HOUR) as i8
}

/// Parses an offset string such as `+0530`, `-03:30` or `0000` into quarter hours.
pub fn quarter_hours_from_offset_str(offset: &str) -> Result<i8, Gsh01Error> {
    let invalid = || Gsh01Error::InvalidUtcOffset(offset.to_string());

    let trimmed = offset.trim();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        Some(_) => (1, trimmed),
        None => return Err(invalid()),
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();

    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: i32 = digits.parse().map_err(|_| invalid())?;
    if value / 100 > 14 || value % 100 > 59 {
        return Err(invalid());
    }

    Ok(quarter_hours_from_hhmm(sign * value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_epoch_seconds_truncates_subseconds() {
        let t = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
        assert_eq!(timepoint_to_epoch_seconds(&t), 1_700_000_000);
    }

    #[test]
    fn test_epoch_seconds_ignores_zone() {
        let utc = Utc.timestamp_opt(1_000, 0).unwrap();
        let ist = utc.with_timezone(&FixedOffset::east_opt(5 * 3600 + 1800).unwrap());
        assert_eq!(timepoint_to_epoch_seconds(&utc), timepoint_to_epoch_seconds(&ist));
    }

    #[test]
    fn test_epoch_seconds_wraps_after_2106() {
        let t = Utc.timestamp_opt(u32::MAX as i64 + 11, 0).unwrap();
        assert_eq!(timepoint_to_epoch_seconds(&t), 10);
    }

    #[test]
    fn test_offset_from_datetime() {
        let zones = [
            (2 * 3600, 8),
            (5 * 3600 + 30 * 60, 22),
            (5 * 3600 + 45 * 60, 23),
            (-(3 * 3600 + 30 * 60), -14),
            (-(45 * 60), -3),
            (0, 0),
        ];
        for (seconds, expected) in zones {
            let tz = FixedOffset::east_opt(seconds).unwrap();
            let t = tz.timestamp_opt(1_700_000_000, 0).unwrap();
            assert_eq!(utc_offset_quarter_hours(&t), expected, "offset {seconds}s");
        }
    }

    #[test]
    fn test_hhmm_folding() {
        assert_eq!(quarter_hours_from_hhmm(1345), 55);
        assert_eq!(quarter_hours_from_hhmm(-1200), -48);
        // a 60-minute remainder is an extra hour
        assert_eq!(quarter_hours_from_hhmm(160), 8);
    }

    #[test]
    fn test_offset_str_rejects_garbage() {
        for bad in ["", "+", "+5", "+05300", "ab:cd", "+2500", "+0560"] {
            assert!(quarter_hours_from_offset_str(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_offset_str_with_colon() {
        assert_eq!(quarter_hours_from_offset_str("+05:45").unwrap(), 23);
        assert_eq!(quarter_hours_from_offset_str("0000").unwrap(), 0);
    }
}
