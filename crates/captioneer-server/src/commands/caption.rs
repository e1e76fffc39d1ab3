use std::path::PathBuf;

use crate::pipeline::PipelineArgs;

/// Args for the caption command.
#[derive(clap::Args, Debug)]
pub struct CaptionArgs {
    #[command(flatten)]
    pipeline: PipelineArgs,

    /// Image files to caption.
    #[arg(long = "image", required = true)]
    images: Vec<PathBuf>,
}

impl CaptionArgs {
    /// Run the caption command.
    ///
    /// Prints one caption per line; with several images, each is prefixed by its path.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let service = self.pipeline.load_service()?;

        for path in &self.images {
            let image = image::open(path)?;
            let caption = service.caption_image(&image)?;

            if self.images.len() == 1 {
                println!("{caption}");
            } else {
                println!("{}\t{caption}", path.display());
            }
        }

        Ok(())
    }
}
