use crate::commands::{caption::CaptionArgs, serve::ServeArgs, vocab::VocabCommandArgs};

pub mod caption;
pub mod serve;
pub mod vocab;

/// Subcommands for captioneer
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Serve captions over HTTP.
    Serve(ServeArgs),

    /// Caption local image files.
    Caption(CaptionArgs),

    /// Vocabulary tools.
    Vocab(VocabCommandArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Serve(cmd) => cmd.run(),
            Commands::Caption(cmd) => cmd.run(),
            Commands::Vocab(cmd) => cmd.run(),
        }
    }
}
