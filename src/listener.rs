//! Signal-driven verbosity: SIGUSR1 raises the threshold, SIGUSR2 lowers it.

use std::sync::Arc;

use crate::logger::{Logger, SOURCE};

/// One step of the threshold in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    /// More detail (threshold + 1).
    Raise,
    /// Less detail (threshold - 1).
    Lower,
}

/// Outcome of [`Logger::listen_for_signals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Started,
    AlreadyActive,
}

impl Logger {
    /// Move the threshold one step. Out-of-range requests are rejected by
    /// `set_level`, so stepping past either end only logs a rejection.
    pub fn adjust(&self, step: Adjust) {
        let current = self.get_level().as_i32();
        match step {
            Adjust::Raise => self.set_level(current + 1),
            Adjust::Lower => self.set_level(current - 1),
        }
    }

    /// Start the background listener. Idempotent: a second call logs a
    /// System line and returns [`Activation::AlreadyActive`].
    ///
    /// The listener runs for the rest of the process; there is no way to
    /// stop it.
    pub fn listen_for_signals(self: &Arc<Self>) -> anyhow::Result<Activation> {
        let already_active = {
            let mut state = self.state_mut();
            std::mem::replace(&mut state.listening, true)
        };
        if already_active {
            self.system(SOURCE, &["signal listener already active"]);
            return Ok(Activation::AlreadyActive);
        }
        if let Err(e) = imp::spawn(Arc::clone(self)) {
            self.state_mut().listening = false;
            return Err(e);
        }
        tracing::debug!("signal listener started");
        Ok(Activation::Started)
    }
}

#[cfg(unix)]
mod imp {
    use std::sync::Arc;
    use std::thread;

    use anyhow::Context;
    use signal_hook::consts::{SIGUSR1, SIGUSR2};
    use signal_hook::iterator::Signals;

    use super::Adjust;
    use crate::logger::Logger;

    pub(super) fn spawn(logger: Arc<Logger>) -> anyhow::Result<()> {
        let signals =
            Signals::new([SIGUSR1, SIGUSR2]).context("registering SIGUSR1/SIGUSR2 handlers")?;
        thread::Builder::new()
            .name("levelgate-signals".into())
            .spawn(move || run(&logger, signals))
            .context("spawning signal listener thread")?;
        Ok(())
    }

    fn run(logger: &Logger, mut signals: Signals) {
        for signal in signals.forever() {
            tracing::trace!(signal, "verbosity signal received");
            match signal {
                SIGUSR1 => logger.adjust(Adjust::Raise),
                SIGUSR2 => logger.adjust(Adjust::Lower),
                _ => {}
            }
        }
    }
}

#[cfg(not(unix))]
mod imp {
    use std::sync::Arc;

    use crate::logger::Logger;

    pub(super) fn spawn(_logger: Arc<Logger>) -> anyhow::Result<()> {
        anyhow::bail!("signal-driven verbosity needs SIGUSR1/SIGUSR2, which this platform lacks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::tests::captured;
    use crate::severity::Severity;

    #[test]
    fn raise_and_lower_step_by_one() {
        let (logger, _capture) = captured();
        logger.adjust(Adjust::Raise);
        assert_eq!(logger.get_level(), Severity::Info);
        logger.adjust(Adjust::Lower);
        logger.adjust(Adjust::Lower);
        assert_eq!(logger.get_level(), Severity::Error);
    }

    #[test]
    fn raise_past_debug_is_rejected() {
        let (logger, capture) = captured();
        logger.set_level(5);
        let before = capture.lines().len();
        logger.adjust(Adjust::Raise);
        assert_eq!(logger.get_level(), Severity::Debug);
        assert_eq!(
            capture.lines()[before..],
            ["[SYS] [LOG] cannot set log level to 6".to_string()]
        );
    }

    #[test]
    fn lower_past_system_is_rejected() {
        let (logger, capture) = captured();
        logger.set_level(1);
        let before = capture.lines().len();
        logger.adjust(Adjust::Lower);
        assert_eq!(logger.get_level(), Severity::System);
        assert_eq!(
            capture.lines()[before..],
            ["[SYS] [LOG] cannot set log level to 0".to_string()]
        );
    }

    #[cfg(unix)]
    #[test]
    fn second_activation_is_rejected() {
        let (logger, capture) = captured();
        let logger = Arc::new(logger);
        assert_eq!(logger.listen_for_signals().unwrap(), Activation::Started);
        assert_eq!(
            logger.listen_for_signals().unwrap(),
            Activation::AlreadyActive
        );
        assert_eq!(
            capture.lines(),
            vec!["[SYS] [LOG] signal listener already active"]
        );
        assert!(logger.state().listening);
    }

    #[cfg(unix)]
    #[test]
    fn concurrent_activation_starts_one_listener() {
        let (logger, capture) = captured();
        let logger = Arc::new(logger);
        let outcomes: Vec<Activation> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    s.spawn(move || logger.listen_for_signals().unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        let started = outcomes
            .iter()
            .filter(|o| **o == Activation::Started)
            .count();
        assert_eq!(started, 1);
        assert_eq!(capture.lines().len(), 7);
        // The lock is free again once activation returns.
        logger.set_level(4);
        assert_eq!(logger.get_level(), Severity::Info);
    }
}
