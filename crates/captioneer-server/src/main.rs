//! # captioneer
//!
//! Image captioning from the command line, or over HTTP.
mod commands;
mod disk_cache;
mod input_output;
mod logging;
mod pipeline;

use clap::Parser;
use commands::Commands;
use logging::{DEFAULT_VERBOSITY, LogArgs};

/// captioneer
#[derive(clap::Parser, Debug)]
pub struct Args {
    #[command(flatten)]
    pub logging: LogArgs,

    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.logging.setup_logging(DEFAULT_VERBOSITY)?;

    args.command.run()
}
