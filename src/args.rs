use clap::{ArgAction, Parser, ValueEnum};

/// Levelgate: emit a heartbeat at every severity through a level-gated logger.
///
/// Send SIGUSR1 to show more detail and SIGUSR2 to show less; the current
/// threshold is confirmed on a SYS line after each change.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Initial threshold: 1=SYS, 2=ERR, 3=WNG, 4=INF, 5=DBG
    #[arg(long = "level", default_value_t = 3)]
    pub level: i32,

    /// Source tag printed on heartbeat lines
    #[arg(long = "source", default_value = "MAIN")]
    pub source: String,

    /// Milliseconds between heartbeats (must be > 0)
    #[arg(long = "interval-ms", default_value_t = 1000)]
    pub interval_ms: u64,

    /// Number of heartbeats before exiting (0 = run forever)
    #[arg(long = "ticks", default_value_t = 0)]
    pub ticks: u64,

    /// Log a fatal message and exit after this many heartbeats
    #[arg(long = "fatal-after")]
    pub fatal_after: Option<u64>,

    /// Do not listen for SIGUSR1/SIGUSR2
    #[arg(long = "no-listen", action = ArgAction::SetTrue)]
    pub no_listen: bool,

    /// Where gated lines go
    #[arg(long = "sink", value_enum, default_value_t = SinkKind::Stderr)]
    pub sink: SinkKind,

    /// Diagnostics verbosity: 0=warn, 1=info, 2=debug
    #[arg(long = "verbosity", default_value_t = 0)]
    pub verbosity: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Plain lines on stderr
    Stderr,
    /// Forward into the tracing subscriber
    Tracing,
}

impl Args {
    /// Validate numeric constraints that clap doesn't enforce here.
    fn validate(&self) -> anyhow::Result<()> {
        if !(1..=5).contains(&self.level) {
            anyhow::bail!("--level must be in 1..=5");
        }
        if self.interval_ms == 0 {
            anyhow::bail!("--interval-ms must be > 0");
        }
        if self.verbosity > 2 {
            anyhow::bail!("--verbosity must be in 0..=2");
        }
        Ok(())
    }
}

/// Parse CLI args in one place so main.rs does not need clap in scope.
pub fn parse() -> Args {
    let args = Args::parse();
    // Fail-fast on invalid values
    if let Err(e) = args.validate() {
        // Print a friendly error and exit with non-zero, matching clap behavior
        eprintln!("error: {}", e);
        std::process::exit(2);
    }
    args
}
