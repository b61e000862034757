use std::sync::Arc;
use std::thread;
use std::time::Duration;

use levelgate::{Logger, StderrSink, TracingSink};
use tracing::debug;

mod args;
mod log;

use args::SinkKind;

fn main() -> anyhow::Result<()> {
    let args = args::parse();

    // Lines forwarded into tracing are already gated; let them all through.
    let diag_level = match args.sink {
        SinkKind::Tracing => "debug",
        SinkKind::Stderr => log::level_from_verbosity(args.verbosity),
    };
    log::init(diag_level);

    let builder = Logger::builder().level(args.level);
    let logger = Arc::new(match args.sink {
        SinkKind::Stderr => builder.sink(StderrSink).build()?,
        SinkKind::Tracing => builder.sink(TracingSink).build()?,
    });

    if !args.no_listen {
        logger.listen_for_signals()?;
        logger.system(
            &args.source,
            &[format!(
                "pid {}: send SIGUSR1 for more detail, SIGUSR2 for less",
                std::process::id()
            )],
        );
    }

    let level = logger.get_level();
    logger.system(
        &args.source,
        &[format!("started at level {} ({})", level.as_i32(), level)],
    );

    let interval = Duration::from_millis(args.interval_ms);
    let mut tick: u64 = 0;
    loop {
        tick += 1;
        heartbeat(&logger, &args.source, tick);

        if args.fatal_after == Some(tick) {
            logger.fatal(
                &args.source,
                &[
                    format!("heartbeat {tick}: giving up"),
                    "fatal-after reached".to_string(),
                ],
            );
        }
        if args.ticks != 0 && tick >= args.ticks {
            break;
        }
        thread::sleep(interval);
    }

    logger.system(&args.source, &[format!("done after {tick} heartbeats")]);
    Ok(())
}

fn heartbeat(logger: &Logger, source: &str, tick: u64) {
    debug!(tick, "heartbeat");
    let message = [format!("heartbeat {tick}")];
    logger.error(source, &message);
    logger.warning(source, &message);
    logger.info(source, &message);
    logger.debug(source, &message);
}
