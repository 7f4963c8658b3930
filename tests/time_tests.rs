//! Integration tests for the meter clock encoding in `gsh01::time`.

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use gsh01_rs::gsh01::time::{
    quarter_hours_from_hhmm, quarter_hours_from_offset_str, timepoint_to_epoch_seconds,
    utc_offset_quarter_hours,
};
use gsh01_rs::Gsh01Error;

/// Tests the documented offset strings.
#[test]
fn test_offset_strings() {
    let cases = [
        ("+0200", 8),
        ("+0530", 22),
        ("-0330", -14),
        ("+0000", 0),
        ("+1345", 55),
        ("+0545", 23),
        ("-1200", -48),
        ("+1400", 56),
    ];
    for (text, expected) in cases {
        assert_eq!(quarter_hours_from_offset_str(text).unwrap(), expected, "{text}");
    }
}

/// Tests that numeric and string forms agree.
#[test]
fn test_hhmm_matches_strings() {
    assert_eq!(quarter_hours_from_hhmm(530), 22);
    assert_eq!(quarter_hours_from_hhmm(-330), -14);
    assert_eq!(quarter_hours_from_hhmm(0), 0);
}

/// Tests that a malformed offset is reported with its text.
#[test]
fn test_invalid_offset_error() {
    let err = quarter_hours_from_offset_str("UTC").unwrap_err();
    assert_eq!(err, Gsh01Error::InvalidUtcOffset("UTC".to_string()));
}

/// Tests the offset derived from zoned timestamps.
#[test]
fn test_offset_from_zoned_time() {
    let kathmandu = FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap();
    let newfoundland = FixedOffset::west_opt(3 * 3600 + 30 * 60).unwrap();
    let t = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    assert_eq!(utc_offset_quarter_hours(&t), 0);
    assert_eq!(utc_offset_quarter_hours(&t.with_timezone(&kathmandu)), 23);
    assert_eq!(utc_offset_quarter_hours(&t.with_timezone(&newfoundland)), -14);
}

/// Tests epoch seconds for a calendar date.
#[test]
fn test_epoch_seconds_for_date() {
    let t = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    assert_eq!(timepoint_to_epoch_seconds(&t), 1_704_067_200);
}
