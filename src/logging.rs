use crate::util::hex::format_hex_compact;
use log::{debug, error, info, log_enabled, warn, Level};

/// Initializes the logger with the `env_logger` crate.
///
/// The filter is taken from `RUST_LOG`; without it only errors are shown.
pub fn init_logger() {
    env_logger::init();
}

/// Like [`init_logger`], but does not panic when a logger is already installed.
///
/// Useful for tests and for hosts that embed the codec next to their own logger.
pub fn try_init_logger() -> bool {
    env_logger::try_init().is_ok()
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}

/// Logs a frame as a compact hex dump at debug level.
///
/// The hex string is only built when debug logging is enabled.
pub fn log_frame_hex(label: &str, frame: &[u8]) {
    if log_enabled!(Level::Debug) {
        debug!("{label}: {} (size: {})", format_hex_compact(frame), frame.len());
    }
}
