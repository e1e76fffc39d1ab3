//! # Artifact Provisioner

use std::{fmt, path::PathBuf};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::{
    artifacts::{ArtifactLoader, ArtifactSource},
    errors::{CResult, CaptioneerError},
};

/// Guarantees a model artifact is present on local storage.
///
/// The first successful [`ensure_available`](Self::ensure_available) fixes the
/// path for the lifetime of the provisioner; later calls return it without
/// touching the filesystem or the network. Concurrent first calls are
/// serialized; exactly one of them provisions.
///
/// Failures are not remembered; a later call provisions from scratch.
pub struct ArtifactProvisioner {
    source: ArtifactSource,
    loader: Option<Mutex<Box<dyn ArtifactLoader>>>,
    path: OnceCell<PathBuf>,
}

impl fmt::Debug for ArtifactProvisioner {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("ArtifactProvisioner")
            .field("source", &self.source)
            .field("path", &self.path.get())
            .finish_non_exhaustive()
    }
}

impl ArtifactProvisioner {
    /// Construct a provisioner.
    ///
    /// ## Arguments
    /// * `source` - where the artifact comes from.
    /// * `loader` - fetches [`ArtifactSource::Remote`] artifacts; unused for local files.
    pub fn new(
        source: ArtifactSource,
        loader: Option<Box<dyn ArtifactLoader>>,
    ) -> Self {
        Self {
            source,
            loader: loader.map(Mutex::new),
            path: OnceCell::new(),
        }
    }

    /// Construct a provisioner for a file shipped with the deployment.
    pub fn local<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(ArtifactSource::Local(path.into()), None)
    }

    /// Construct a provisioner backed by a [`CaptioneerDiskCache`](crate::disk_cache::CaptioneerDiskCache).
    ///
    /// The cache is only built for remote sources.
    #[cfg(feature = "download")]
    pub fn with_disk_cache(
        source: ArtifactSource,
        options: crate::disk_cache::CaptioneerDiskCacheOptions,
    ) -> CResult<Self> {
        let loader: Option<Box<dyn ArtifactLoader>> = if source.is_remote() {
            let cache = crate::disk_cache::CaptioneerDiskCache::new(options)
                .map_err(|e| CaptioneerError::Provisioning(format!("{e:#}")))?;
            Some(Box::new(cache))
        } else {
            None
        };
        Ok(Self::new(source, loader))
    }

    /// The artifact source.
    pub fn source(&self) -> &ArtifactSource {
        &self.source
    }

    /// Has the artifact been provisioned?
    pub fn is_available(&self) -> bool {
        self.path.get().is_some()
    }

    /// Ensure the artifact is present, returning its local path.
    ///
    /// ## Errors
    /// * [`CaptioneerError::Provisioning`] if a local file is missing, a remote
    ///   source has no loader, or the fetch fails.
    pub fn ensure_available(&self) -> CResult<PathBuf> {
        self.path
            .get_or_try_init(|| self.provision())
            .cloned()
    }

    fn provision(&self) -> CResult<PathBuf> {
        let path = match &self.source {
            ArtifactSource::Local(path) => {
                if !path.is_file() {
                    return Err(CaptioneerError::Provisioning(format!(
                        "model artifact not found: {}",
                        path.display()
                    )));
                }
                path.clone()
            }
            ArtifactSource::Remote { key, urls } => {
                let loader = self.loader.as_ref().ok_or_else(|| {
                    CaptioneerError::Provisioning("no artifact loader configured".to_string())
                })?;
                loader.lock().load_artifact_path(key, urls)?
            }
        };

        log::info!("model artifact available at {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
    };

    use tempdir::TempDir;

    use super::*;

    /// Writes ``<dir>/<key...>/model.onnx``; fails while `failures` remain.
    struct FakeLoader {
        dir: PathBuf,
        calls: Arc<AtomicUsize>,
        failures: usize,
    }

    impl ArtifactLoader for FakeLoader {
        fn load_artifact_path(
            &mut self,
            key: &[String],
            _urls: &[String],
        ) -> CResult<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures > 0 {
                self.failures -= 1;
                return Err(CaptioneerError::Provisioning("unreachable".to_string()));
            }
            let mut path = self.dir.clone();
            path.extend(key);
            fs::create_dir_all(&path)?;
            path.push("model.onnx");
            fs::write(&path, b"onnx")?;
            Ok(path)
        }
    }

    fn remote(
        dir: &TempDir,
        failures: usize,
    ) -> (ArtifactProvisioner, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = FakeLoader {
            dir: dir.path().to_path_buf(),
            calls: calls.clone(),
            failures,
        };
        let provisioner = ArtifactProvisioner::new(
            ArtifactSource::remote(&["decoder"], &["https://example.com/model.onnx"]),
            Some(Box::new(loader)),
        );
        (provisioner, calls)
    }

    #[test]
    fn test_ensure_available_fetches_once() {
        let dir = TempDir::new("provisioner").unwrap();
        let (provisioner, calls) = remote(&dir, 0);
        assert!(!provisioner.is_available());

        let first = provisioner.ensure_available().unwrap();
        let second = provisioner.ensure_available().unwrap();

        assert_eq!(first, second);
        assert_eq!(first, dir.path().join("decoder/model.onnx"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(provisioner.is_available());
    }

    #[test]
    fn test_failure_is_not_remembered() {
        let dir = TempDir::new("provisioner").unwrap();
        let (provisioner, calls) = remote(&dir, 1);

        let err = provisioner.ensure_available().unwrap_err();
        assert!(matches!(err, CaptioneerError::Provisioning(_)));
        assert!(!provisioner.is_available());

        assert!(provisioner.ensure_available().is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_first_use() {
        let dir = TempDir::new("provisioner").unwrap();
        let (provisioner, calls) = remote(&dir, 0);
        let provisioner = Arc::new(provisioner);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provisioner = provisioner.clone();
                thread::spawn(move || provisioner.ensure_available().unwrap())
            })
            .collect();

        let paths: Vec<PathBuf> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(paths.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_local_source() {
        let dir = TempDir::new("provisioner").unwrap();
        let path = dir.path().join("model.onnx");

        let provisioner = ArtifactProvisioner::local(&path);
        let err = provisioner.ensure_available().unwrap_err();
        assert!(matches!(err, CaptioneerError::Provisioning(_)));

        fs::write(&path, b"onnx").unwrap();
        assert_eq!(provisioner.ensure_available().unwrap(), path);
    }

    #[test]
    fn test_remote_without_loader() {
        let provisioner = ArtifactProvisioner::new(
            ArtifactSource::remote(&["decoder"], &["https://example.com/model.onnx"]),
            None,
        );
        assert!(matches!(
            provisioner.ensure_available(),
            Err(CaptioneerError::Provisioning(_))
        ));
    }
}
