//! CRC-16/XMODEM as used by the GSH01 serial link layer.
//!
//! The application layer frames produced by this crate carry no checksum; the
//! serial transport appends this CRC below the codec.

use crc::{Crc, CRC_16_XMODEM};

const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Computes the CRC-16/XMODEM (poly 0x1021, init 0) over `message`.
///
/// Messages shorter than two bytes yield 0, which is what the meter link
/// expects for them.
pub fn crc16_xmodem(message: &[u8]) -> u16 {
    if message.len() < 2 {
        return 0;
    }
    XMODEM.checksum(message)
}
