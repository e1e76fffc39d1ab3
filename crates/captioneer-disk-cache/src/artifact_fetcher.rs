//! # Artifact Fetchers

use std::path::Path;

use downloader::{Download, Downloader};

/// Fetches remote bytes into a local file.
///
/// Implementations make a single attempt; retry policy belongs to callers.
pub trait ArtifactFetcher: Send {
    /// Fetch the first reachable of `urls` into `dest`.
    ///
    /// `dest` does not exist when this is called, and its parent directory does.
    ///
    /// # Errors
    /// * The source is unreachable, or answers with a failure status.
    /// * The destination can not be written.
    fn fetch(
        &mut self,
        urls: &[&str],
        dest: &Path,
    ) -> anyhow::Result<()>;
}

impl ArtifactFetcher for Downloader {
    fn fetch(
        &mut self,
        urls: &[&str],
        dest: &Path,
    ) -> anyhow::Result<()> {
        let dl = Download::new_mirrored(urls).file_name(dest);

        for result in self.download(&[dl])? {
            result?;
        }

        Ok(())
    }
}
