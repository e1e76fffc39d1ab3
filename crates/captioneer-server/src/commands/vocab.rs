use std::{io::Write, path::PathBuf};

use captioneer::{
    decoders::DecoderOptions,
    service::ServiceConfig,
    vocab::io::write_base64_word_vocab,
};

use crate::{disk_cache::DiskCacheArgs, input_output::OutputArgs, pipeline::VocabArgs};

/// Subcommands for the vocab command.
#[derive(clap::Subcommand, Debug)]
pub enum VocabCommand {
    /// Convert a vocabulary to base64 lines.
    Export(ExportArgs),

    /// Describe a vocabulary.
    Info(InfoArgs),
}

/// Args for the vocab command.
#[derive(clap::Args, Debug)]
pub struct VocabCommandArgs {
    #[clap(subcommand)]
    pub command: VocabCommand,
}

impl VocabCommandArgs {
    /// Run the vocab command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            VocabCommand::Export(cmd) => cmd.run(),
            VocabCommand::Info(cmd) => cmd.run(),
        }
    }
}

/// Args for the vocab export command.
#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,
}

impl ExportArgs {
    /// Run the vocab export command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let vocab = self.vocab.load_vocab(&self.disk_cache)?;

        let mut writer = self.output.open_writer()?;
        write_base64_word_vocab(&vocab, &mut writer)?;
        writer.flush()?;

        Ok(())
    }
}

/// Args for the vocab info command.
#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    /// JSON service config file; its decoder sentinels are checked.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the start sentinel.
    #[arg(long)]
    start_token: Option<String>,

    /// Override the end sentinel.
    #[arg(long)]
    end_token: Option<String>,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,
}

impl InfoArgs {
    /// The decoder options whose sentinels are checked.
    pub fn decoder_options(&self) -> Result<DecoderOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => ServiceConfig::load_path(path)?.decoder,
            None => DecoderOptions::default(),
        };
        if let Some(token) = &self.start_token {
            options = options.with_start_token(token.clone());
        }
        if let Some(token) = &self.end_token {
            options = options.with_end_token(token.clone());
        }
        Ok(options)
    }

    /// Run the vocab info command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let vocab = self.vocab.load_vocab(&self.disk_cache)?;
        let options = self.decoder_options()?;

        println!("words:     {}", vocab.len());
        match vocab.max_id() {
            Some(max_id) => println!("max id:    {max_id}"),
            None => println!("max id:    -"),
        }
        if let Some(num_words) = vocab.num_words() {
            println!("num words: {num_words}");
        }
        if let Some(oov) = vocab.oov_token() {
            println!("oov token: {oov:?}");
        }
        for sentinel in [&options.start_token, &options.end_token] {
            match vocab.id_for_word(sentinel) {
                Some(id) => println!("sentinel:  {sentinel:?} = {id}"),
                None => println!("sentinel:  {sentinel:?} missing"),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempdir::TempDir;

    use super::*;

    #[derive(clap::Parser, Debug)]
    struct InfoCli {
        #[command(flatten)]
        info: InfoArgs,
    }

    fn parse(args: &[&str]) -> InfoArgs {
        InfoCli::try_parse_from(std::iter::once("info").chain(args.iter().copied()))
            .unwrap()
            .info
    }

    #[test]
    fn test_default_sentinels() {
        let options = parse(&[]).decoder_options().unwrap();
        assert_eq!(options.start_token, "start");
        assert_eq!(options.end_token, "end");
    }

    #[test]
    fn test_config_sentinels() {
        let dir = TempDir::new("captioneer_vocab_info").unwrap();
        let config = dir.path().join("service.json");
        std::fs::write(
            &config,
            r#"{"decoder": {"start_token": "<s>", "end_token": "</s>"}}"#,
        )
        .unwrap();
        let config = config.to_str().unwrap();

        let options = parse(&["--config", config]).decoder_options().unwrap();
        assert_eq!(options.start_token, "<s>");
        assert_eq!(options.end_token, "</s>");

        let options = parse(&["--config", config, "--end-token", "stop"])
            .decoder_options()
            .unwrap();
        assert_eq!(options.start_token, "<s>");
        assert_eq!(options.end_token, "stop");
    }
}
