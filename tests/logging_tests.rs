//! Tests for the logging helpers of the `gsh01-rs` crate.

use gsh01_rs::logging::{log_debug, log_error, log_frame_hex, log_info, log_warn, try_init_logger};
use gsh01_rs::{encode, Command, StatusWord};

/// Tests that the logging helpers do not panic once a logger is installed.
#[test]
fn test_logging() {
    let _ = try_init_logger();
    log_error("This is an error message");
    log_warn("This is a warning message");
    log_info("This is an info message");
    log_debug("This is a debug message");
    log_frame_hex("TX", &encode(&Command::get_status_word()));
    StatusWord::new(0x0000_0008_0002_0001).log_conditions();
}

/// A second installation attempt reports failure instead of panicking.
#[test]
fn test_try_init_logger_twice() {
    let _ = try_init_logger();
    assert!(!try_init_logger());
}
