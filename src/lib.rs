//! Process-wide severity-gated logger.
//!
//! Lines look like `[INF] [NET] peer connected`. Fatal and System messages
//! always pass the gate; Error, Warning, Info and Debug pass only when the
//! threshold is at least that verbose. The threshold can be changed at runtime
//! with [`Logger::set_level`] or, once [`Logger::listen_for_signals`] has been
//! called, with SIGUSR1 (more detail) and SIGUSR2 (less detail).

pub mod listener;
pub mod logger;
pub mod severity;
pub mod sink;

pub use listener::{Activation, Adjust};
pub use logger::{FATAL_EXIT_CODE, Logger, LoggerBuilder, format_line};
pub use severity::{LABELS, Severity};
pub use sink::{Sink, StderrSink, TracingSink};
