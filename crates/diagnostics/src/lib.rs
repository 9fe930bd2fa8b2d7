// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Logging setup shared by the treefs crates.
//!
//! The level is taken from the `TREEFS_LOG` environment variable:
//! - `off` (default): nothing is emitted
//! - `error`, `warn`, `info`: increasingly chatty
//! - `debug`: every namespace mutation and every swallowed failure
//!
//! Events go to stderr through `emit_term`, so they never mix with
//! command output on stdout.

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable consulted by [`init_diagnostics`].
pub const LOG_ENV: &str = "TREEFS_LOG";

static INIT: Once = Once::new();

/// Maps a `TREEFS_LOG` value to a minimum level. `None` means logging is off.
pub fn parse_level(value: &str) -> Result<Option<emit::Level>, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "off" => Ok(None),
        "error" => Ok(Some(emit::Level::Error)),
        "warn" => Ok(Some(emit::Level::Warn)),
        "info" => Ok(Some(emit::Level::Info)),
        "debug" => Ok(Some(emit::Level::Debug)),
        other => Err(format!("Unknown {} value '{}'", LOG_ENV, other)),
    }
}

/// Initialize diagnostics from the `TREEFS_LOG` environment variable.
///
/// Safe to call more than once; only the first call has any effect.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let value = std::env::var(LOG_ENV).unwrap_or_default();
        let level = match parse_level(&value) {
            Ok(Some(level)) => level,
            Ok(None) => return,
            Err(msg) => {
                // Logging is not running yet, so this is the only way to say it.
                eprintln!("Warning: {}, using 'info'", msg);
                emit::Level::Info
            }
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        // The runtime lives for the whole process.
        std::mem::forget(rt);
    });
}

/// Log operations a user may want to see in normal usage.
///
/// Examples: "Loaded snapshot", "Session started"
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics: individual mutations, resolution failures.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable problems, such as falling back to defaults.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that stop an operation from completing.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_safe_to_call_multiple_times() {
        init_diagnostics();
        init_diagnostics();
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("off"), Ok(None));
        assert_eq!(parse_level(""), Ok(None));
        assert_eq!(parse_level("debug"), Ok(Some(emit::Level::Debug)));
        assert_eq!(parse_level(" WARN "), Ok(Some(emit::Level::Warn)));
        assert!(parse_level("chatty").is_err());
    }

    #[test]
    fn test_macros_compile() {
        log_info!("Test message");
        log_debug!("Debug message with {value}", value: 42);
        log_warn!("Warning message");
        log_error!("Error message");
    }
}
