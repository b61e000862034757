//! Line sinks the logger writes gated messages to.

use std::io::{self, Write};

use crate::severity::Severity;

/// Destination for formatted log lines.
///
/// Implementations must emit each line in a single write so concurrent
/// callers can interleave whole lines but never split one.
pub trait Sink: Send + Sync {
    fn write_line(&self, level: Severity, line: &str);
}

/// Plain lines on stderr, the process's standard log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_line(&self, _level: Severity, line: &str) {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        // Sink failures are not reported back to callers.
        let _ = io::stderr().lock().write_all(buf.as_bytes());
    }
}

/// Forwards lines into `tracing`, for hosts that already run a subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn write_line(&self, level: Severity, line: &str) {
        match level {
            Severity::Fatal | Severity::Error => tracing::error!("{line}"),
            Severity::Warning => tracing::warn!("{line}"),
            Severity::System | Severity::Info => tracing::info!("{line}"),
            Severity::Debug => tracing::debug!("{line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn tracing_sink_maps_severities_to_tracing_levels() {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            for level in Severity::ALL {
                TracingSink.write_line(level, &format!("[{}] [T] m", level.label()));
            }
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let levels: Vec<(String, String)> = output
            .lines()
            .map(|line| {
                let (level, rest) = line.trim_start().split_once(' ').unwrap();
                (level.to_string(), rest.trim_start().to_string())
            })
            .collect();
        let expected = [
            ("ERROR", "[FTL] [T] m"),
            ("INFO", "[SYS] [T] m"),
            ("ERROR", "[ERR] [T] m"),
            ("WARN", "[WNG] [T] m"),
            ("INFO", "[INF] [T] m"),
            ("DEBUG", "[DBG] [T] m"),
        ];
        let expected: Vec<(String, String)> = expected
            .iter()
            .map(|(l, m)| (l.to_string(), m.to_string()))
            .collect();
        assert_eq!(levels, expected);
    }
}
