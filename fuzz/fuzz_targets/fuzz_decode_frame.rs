#![no_main]

use gsh01_rs::gsh01::parse_frame;
use gsh01_rs::{decode_command, decode_frame, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must never panic
    let _ = parse_frame(data);
    let _ = decode_frame(data);

    // Anything accepted as a request encodes back to the same bytes
    if let Ok(command) = decode_command(data) {
        assert_eq!(encode(&command), data);
    }

    // Force the declared length to match the input
    if data.len() >= 5 {
        let mut fixed = data.to_vec();
        let len = (data.len().min(usize::from(u16::MAX))) as u16;
        fixed.truncate(usize::from(len));
        fixed[2..4].copy_from_slice(&len.to_le_bytes());
        let _ = decode_command(&fixed);
    }
});
