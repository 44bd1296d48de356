#![deny(missing_docs)]
//! Shared logging utilities for the linklet workspace.
//!
//! This crate provides the `linklet_*` logging macros used by the engine and
//! the terminal front end, plus a minimal test initializer for the global
//! logger. Backends are configured by the binary; libraries only log.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! linklet_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! linklet_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! linklet_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! linklet_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! linklet_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Returns a log line-safe rendering of a URL with any query string hidden.
///
/// Query strings of shortened links frequently carry tokens, so they are
/// replaced with `?…` before a URL reaches a log file.
pub fn redact_query(url: &str) -> String {
    match url.split_once('?') {
        Some((head, _)) => format!("{head}?…"),
        None => url.to_string(),
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
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

#[cfg(test)]
mod tests {
    use super::redact_query;

    #[test]
    fn query_is_hidden() {
        assert_eq!(
            redact_query("https://long.example/path?token=secret"),
            "https://long.example/path?…"
        );
    }

    #[test]
    fn plain_url_is_unchanged() {
        assert_eq!(redact_query("https://x/abc"), "https://x/abc");
    }
}
