//! Integration tests for status word decoding.

use gsh01_rs::gsh01::status_word::{StatusBits, STATUS_WORD_TABLE};
use gsh01_rs::{decode_status_word, StatusWord};

/// Tests that a zero word has no conditions.
#[test]
fn test_empty_word() {
    assert!(decode_status_word(0).is_empty());
}

/// Tests that each table bit alone yields exactly its own description.
#[test]
fn test_each_bit_alone() {
    for entry in STATUS_WORD_TABLE.iter() {
        assert_eq!(decode_status_word(entry.bit.bits()), vec![entry.description]);
    }
}

/// Tests the charging bit.
#[test]
fn test_charging() {
    let word = StatusWord::new(StatusBits::STATUS_CHARGING.bits());
    assert_eq!(word.descriptions(), vec!["Status Charging"]);
    assert!(!word.has_errors());
}

/// Tests that several bits come back in table order.
#[test]
fn test_table_order() {
    let word = StatusBits::FACTORY_JUMPER_SET
        | StatusBits::STATUS_READY_FOR_CHARGING
        | StatusBits::ERROR_SIGNATURE_MODULE;
    assert_eq!(
        decode_status_word(word.bits()),
        vec![
            "Error Signature Module",
            "Status Is Ready for Charging",
            "Factory Jumper set"
        ]
    );
}

/// Tests that every known bit set at once yields the whole table.
#[test]
fn test_all_bits() {
    let all: Vec<&str> = STATUS_WORD_TABLE.iter().map(|e| e.description).collect();
    assert_eq!(decode_status_word(u64::MAX), all);
    assert_eq!(StatusWord::new(u64::MAX).flags(), StatusBits::all());
}

/// Tests that uncatalogued bits are ignored and reported separately.
#[test]
fn test_unknown_bits() {
    let word = StatusWord::from(0x0000_0100_0000_0000);
    assert!(word.descriptions().is_empty());
    assert_eq!(word.unknown_bits(), 0x0000_0100_0000_0000);
    word.log_conditions();
}
