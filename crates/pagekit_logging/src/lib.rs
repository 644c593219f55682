#![deny(missing_docs)]
//! Shared logging utilities for the pagekit workspace.
//!
//! This crate provides the `page_*` logging macros used across the codebase,
//! the virtual-clock timestamp the engine stamps its diagnostics with, and a
//! minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the current virtual clock reading, in milliseconds.
    static VIRTUAL_NOW_MS: Cell<u64> = const { Cell::new(0) };
}

/// Records the virtual clock reading for the current thread.
/// The engine calls this every time its event loop moves time forward.
pub fn set_virtual_time(now_ms: u64) {
    VIRTUAL_NOW_MS.with(|v| v.set(now_ms));
}

/// Retrieves the virtual clock reading for the current thread.
/// Returns 0 before any page has advanced its clock.
pub fn virtual_time() -> u64 {
    VIRTUAL_NOW_MS.with(|v| v.get())
}

/// Logs a trace-level message prefixed with the virtual time.
#[macro_export]
macro_rules! page_trace {
    ($($arg:tt)*) => {{
        log::trace!("[t={}ms] {}", $crate::virtual_time(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message prefixed with the virtual time.
#[macro_export]
macro_rules! page_debug {
    ($($arg:tt)*) => {{
        log::debug!("[t={}ms] {}", $crate::virtual_time(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message prefixed with the virtual time.
#[macro_export]
macro_rules! page_info {
    ($($arg:tt)*) => {{
        log::info!("[t={}ms] {}", $crate::virtual_time(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message prefixed with the virtual time.
#[macro_export]
macro_rules! page_warn {
    ($($arg:tt)*) => {{
        log::warn!("[t={}ms] {}", $crate::virtual_time(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message prefixed with the virtual time.
#[macro_export]
macro_rules! page_error {
    ($($arg:tt)*) => {{
        log::error!("[t={}ms] {}", $crate::virtual_time(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Trace in debug builds so scroll and frame diagnostics show up.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
