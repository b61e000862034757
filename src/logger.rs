//! The level-gated logger.
//!
//! One [`Logger`] is built at startup and shared (usually as `Arc<Logger>`)
//! with every component that logs. The threshold lives behind a reader/writer
//! lock: every gated call takes the shared side, `set_level` and listener
//! activation take the exclusive side.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::severity::Severity;
use crate::sink::{Sink, StderrSink};

/// Source tag used for the logger's own operational messages.
pub(crate) const SOURCE: &str = "LOG";

/// Exit code handed to the terminate hook by [`Logger::fatal`].
pub const FATAL_EXIT_CODE: i32 = 1;

/// Called after the terminal fatal line has been written. Never returns.
/// Always `std::process::exit` outside this crate's unit tests.
pub(crate) type Terminate = fn(i32) -> !;

/// Render one log line (without the trailing newline).
pub fn format_line(level: Severity, source: &str, message: &str) -> String {
    format!("[{}] [{}] {}", level.label(), source, message)
}

#[derive(Debug)]
pub(crate) struct State {
    pub(crate) level: Severity,
    pub(crate) listening: bool,
}

pub struct Logger {
    state: RwLock<State>,
    sink: Arc<dyn Sink>,
    terminate: Terminate,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Threshold Warning, listener off, lines on stderr. Performs no I/O.
    pub fn new() -> Self {
        Self::with_sink(StderrSink)
    }

    pub fn with_sink(sink: impl Sink + 'static) -> Self {
        Self {
            state: RwLock::new(State {
                level: Severity::DEFAULT_THRESHOLD,
                listening: false,
            }),
            sink: Arc::new(sink),
            terminate: std::process::exit,
        }
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    // The guarded state is valid after every critical section, so a poisoned
    // lock is still safe to use.
    pub(crate) fn state(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state_mut(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a message at `level` would be written right now.
    pub fn enabled(&self, level: Severity) -> bool {
        level.bypasses_gate() || self.get_level() >= level
    }

    fn log<S: AsRef<str>>(&self, level: Severity, source: &str, messages: &[S]) {
        if !self.enabled(level) {
            return;
        }
        for message in messages {
            self.emit(level, source, message.as_ref());
        }
    }

    fn emit(&self, level: Severity, source: &str, message: &str) {
        self.sink
            .write_line(level, &format_line(level, source, message));
    }

    /// Write every message, then terminate the process.
    ///
    /// All messages but the last go through the normal gate (Fatal always
    /// passes). The last one is the terminal line; the terminate hook runs
    /// right after it with [`FATAL_EXIT_CODE`].
    pub fn fatal<S: AsRef<str>>(&self, source: &str, messages: &[S]) -> ! {
        let (last, rest) = match messages.split_last() {
            Some((last, rest)) => (last.as_ref(), rest),
            None => ("", messages),
        };
        self.log(Severity::Fatal, source, rest);
        self.emit(Severity::Fatal, source, last);
        (self.terminate)(FATAL_EXIT_CODE)
    }

    pub fn system<S: AsRef<str>>(&self, source: &str, messages: &[S]) {
        self.log(Severity::System, source, messages);
    }

    pub fn error<S: AsRef<str>>(&self, source: &str, messages: &[S]) {
        self.log(Severity::Error, source, messages);
    }

    pub fn warning<S: AsRef<str>>(&self, source: &str, messages: &[S]) {
        self.log(Severity::Warning, source, messages);
    }

    pub fn info<S: AsRef<str>>(&self, source: &str, messages: &[S]) {
        self.log(Severity::Info, source, messages);
    }

    pub fn debug<S: AsRef<str>>(&self, source: &str, messages: &[S]) {
        self.log(Severity::Debug, source, messages);
    }

    /// Change the threshold. Values outside `1..6` are rejected with a System
    /// line and leave the threshold untouched.
    pub fn set_level(&self, level: i32) {
        let Some(severity) = Severity::threshold_from_i32(level) else {
            self.system(SOURCE, &[format!("cannot set log level to {level}")]);
            return;
        };
        self.state_mut().level = severity;
        self.system(
            SOURCE,
            &[format!("setting log level to {level} ({})", severity.label())],
        );
    }

    pub fn get_level(&self) -> Severity {
        self.state().level
    }
}

/// Explicit construction with a chosen initial threshold and sink.
pub struct LoggerBuilder {
    level: i32,
    sink: Arc<dyn Sink>,
    terminate: Terminate,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            level: Severity::DEFAULT_THRESHOLD.as_i32(),
            sink: Arc::new(StderrSink),
            terminate: std::process::exit,
        }
    }
}

impl LoggerBuilder {
    pub fn level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    #[cfg(test)]
    pub(crate) fn on_fatal(mut self, terminate: Terminate) -> Self {
        self.terminate = terminate;
        self
    }

    pub fn build(self) -> anyhow::Result<Logger> {
        let Some(level) = Severity::threshold_from_i32(self.level) else {
            anyhow::bail!(
                "initial log level {} is outside 1..{}",
                self.level,
                crate::severity::LABELS.len()
            );
        };
        Ok(Logger {
            state: RwLock::new(State {
                level,
                listening: false,
            }),
            sink: self.sink,
            terminate: self.terminate,
        })
    }
}
