//! # Artifact Loader

use std::path::PathBuf;

use crate::errors::CResult;
#[cfg(feature = "download")]
use crate::errors::CaptioneerError;

/// Makes a remote artifact available as a local file.
pub trait ArtifactLoader: Send {
    /// Load an artifact, returning its local path.
    ///
    /// Implementations should not re-fetch an artifact which is already present.
    ///
    /// ## Errors
    /// * [`CaptioneerError::Provisioning`](crate::CaptioneerError::Provisioning)
    ///   when the artifact can not be fetched or stored.
    fn load_artifact_path(
        &mut self,
        key: &[String],
        urls: &[String],
    ) -> CResult<PathBuf>;
}

#[cfg(feature = "download")]
impl ArtifactLoader for crate::disk_cache::CaptioneerDiskCache {
    fn load_artifact_path(
        &mut self,
        key: &[String],
        urls: &[String],
    ) -> CResult<PathBuf> {
        self.load_cached_path(key, urls, true)
            .map_err(|e| CaptioneerError::Provisioning(format!("{e:#}")))
    }
}

#[cfg(all(test, feature = "download"))]
mod tests {
    use std::{fs, path::Path};

    use tempdir::TempDir;

    use super::*;
    use crate::disk_cache::{ArtifactFetcher, CaptioneerDiskCache, CaptioneerDiskCacheOptions};

    struct StaticFetcher(Option<&'static [u8]>);

    impl ArtifactFetcher for StaticFetcher {
        fn fetch(
            &mut self,
            _urls: &[&str],
            dest: &Path,
        ) -> anyhow::Result<()> {
            match self.0 {
                Some(bytes) => Ok(fs::write(dest, bytes)?),
                None => anyhow::bail!("connection refused"),
            }
        }
    }

    fn cache(
        dir: &TempDir,
        fetcher: StaticFetcher,
    ) -> CaptioneerDiskCache {
        let options = CaptioneerDiskCacheOptions::default()
            .with_cache_dir(Some(dir.path().join("cache")))
            .with_data_dir(Some(dir.path().join("data")));
        CaptioneerDiskCache::new(options)
            .unwrap()
            .with_fetcher(Box::new(fetcher))
    }

    #[test]
    fn test_disk_cache_loader() {
        let dir = TempDir::new("artifact_loader").unwrap();
        let mut loader = cache(&dir, StaticFetcher(Some(b"onnx")));

        let key = vec!["models".to_string()];
        let urls = vec!["https://example.com/decoder.onnx".to_string()];

        let path = loader.load_artifact_path(&key, &urls).unwrap();
        assert_eq!(path, dir.path().join("cache/models/decoder.onnx"));
        assert_eq!(fs::read(&path).unwrap(), b"onnx");
    }

    #[test]
    fn test_disk_cache_loader_failure() {
        let dir = TempDir::new("artifact_loader").unwrap();
        let mut loader = cache(&dir, StaticFetcher(None));

        let key = vec!["models".to_string()];
        let urls = vec!["https://example.com/decoder.onnx".to_string()];

        let err = loader.load_artifact_path(&key, &urls).unwrap_err();
        assert!(matches!(err, CaptioneerError::Provisioning(_)));
        assert!(err.to_string().contains("connection refused"));
        assert!(!dir.path().join("cache/models/decoder.onnx").exists());
    }
}
