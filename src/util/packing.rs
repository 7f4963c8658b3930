//! # Byte Packing Primitives
//!
//! All multi-byte integer fields on the GSH01 wire are little-endian,
//! independent of host byte order. The writers append to any
//! [`bytes::BufMut`] (a `Vec<u8>` or `BytesMut`), the readers are `nom`
//! parsers so they compose with the frame decoder.
//!
//! ```rust
//! use gsh01_rs::util::packing::{insert_u16_le, read_u16_le};
//!
//! let mut buf = Vec::new();
//! insert_u16_le(&mut buf, 0x0034);
//! assert_eq!(buf, [0x34, 0x00]);
//!
//! let (_, value) = read_u16_le(&buf).unwrap();
//! assert_eq!(value, 0x0034);
//! ```

use bytes::BufMut;
use nom::number::complete::{le_u16, le_u32, le_u64};
use nom::IResult;

/// Appends a 16-bit value as two bytes, low byte first.
pub fn insert_u16_le<B: BufMut>(buf: &mut B, value: u16) {
    buf.put_u16_le(value);
}

/// Appends a 32-bit value as four bytes, least significant first.
pub fn insert_u32_le<B: BufMut>(buf: &mut B, value: u32) {
    buf.put_u32_le(value);
}

/// Reads a little-endian 16-bit value.
pub fn read_u16_le(input: &[u8]) -> IResult<&[u8], u16> {
    le_u16(input)
}

/// Reads a little-endian 32-bit value.
pub fn read_u32_le(input: &[u8]) -> IResult<&[u8], u32> {
    le_u32(input)
}

/// Reads a little-endian 64-bit value (status word responses).
pub fn read_u64_le(input: &[u8]) -> IResult<&[u8], u64> {
    le_u64(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use proptest::prelude::*;

    #[test]
    fn test_u16_is_low_byte_first() {
        let mut buf = Vec::new();
        insert_u16_le(&mut buf, 0xABCD);
        assert_eq!(buf, vec![0xCD, 0xAB]);
    }

    #[test]
    fn test_u32_is_least_significant_first() {
        let mut buf = Vec::new();
        insert_u32_le(&mut buf, 0x1234_5678);
        assert_eq!(buf, vec![0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_appends_to_existing_content() {
        let mut buf = BytesMut::new();
        buf.put_u8(0xFF);
        insert_u16_le(&mut buf, 0x0006);
        insert_u32_le(&mut buf, 7);
        assert_eq!(&buf[..], &[0xFF, 0x06, 0x00, 0x07, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_readers_reject_short_input() {
        assert!(read_u16_le(&[0x01]).is_err());
        assert!(read_u32_le(&[0x01, 0x02, 0x03]).is_err());
        assert!(read_u64_le(&[0x00; 7]).is_err());
    }

    #[test]
    fn test_read_u64() {
        let bytes = [0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xAA];
        let (rest, word) = read_u64_le(&bytes).unwrap();
        assert_eq!(word, 0x0002_0000);
        assert_eq!(rest, &[0xAA]);
    }

    proptest! {
        #[test]
        fn prop_u16_roundtrip(value in any::<u16>()) {
            let mut buf = Vec::new();
            insert_u16_le(&mut buf, value);
            prop_assert_eq!(buf.len(), 2);
            let (rest, decoded) = read_u16_le(&buf).unwrap();
            prop_assert!(rest.is_empty());
            prop_assert_eq!(decoded, value);
        }

        #[test]
        fn prop_u32_roundtrip(value in any::<u32>()) {
            let mut buf = Vec::new();
            insert_u32_le(&mut buf, value);
            prop_assert_eq!(buf.len(), 4);
            let (rest, decoded) = read_u32_le(&buf).unwrap();
            prop_assert!(rest.is_empty());
            prop_assert_eq!(decoded, value);
        }
    }
}
