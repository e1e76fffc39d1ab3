use stderrlog::{LogLevelNum, Timestamp};

/// The default verbosity: `Info`.
pub const DEFAULT_VERBOSITY: u8 = 3;

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Turn debugging information on (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, default_value = None)]
    verbose: Option<u8>,

    /// Enable timestamped logging.
    #[clap(long)]
    pub ts: bool,
}

impl LogArgs {
    /// The effective verbosity; `-v` counts upward from `Error`.
    pub fn verbosity(
        &self,
        default: u8,
    ) -> LogLevelNum {
        let level = match self.verbose {
            Some(verbose) if verbose > 0 => verbose,
            _ => default,
        };

        match level {
            0 => LogLevelNum::Off,
            1 => LogLevelNum::Error,
            2 => LogLevelNum::Warn,
            3 => LogLevelNum::Info,
            4 => LogLevelNum::Debug,
            _ => LogLevelNum::Trace,
        }
    }

    /// Install the stderr logger.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        stderrlog::new()
            .module("captioneer")
            .module("captioneer_disk_cache")
            .quiet(self.quiet)
            .verbosity(self.verbosity(default))
            .timestamp(if self.ts {
                Timestamp::Millisecond
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}
