//! Diagnostics init (colorized, with timestamps).
//!
//! Only the binary's own diagnostics and lines routed through
//! `--sink tracing` pass through here; the gated logger itself writes
//! through its sink.

use std::io::IsTerminal;

use tracing_subscriber::fmt::time::UtcTime;

/// Map a numeric verbosity (0..2) to a tracing level string.
pub fn level_from_verbosity(v: u8) -> &'static str {
    match v {
        1 => "info",
        2 => "debug",
        _ => "warn",
    }
}

/// Initialize global diagnostics with color and RFC3339 timestamps.
/// Accepts a level string like "warn" | "info" | "debug".
pub fn init(level: &str) {
    // If a global subscriber is already set, ignore errors.
    let _ = tracing_subscriber::fmt()
        // e.g. 2025-09-23T13:37:42Z
        .with_timer(UtcTime::rfc_3339())
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .with_target(false) // cleaner lines
        .with_ansi(std::io::stderr().is_terminal()) // colors only on a TTY
        .with_level(true)
        .try_init();
}
