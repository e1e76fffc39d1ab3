//! # Artifact Sources

use std::path::PathBuf;

/// A remote artifact, with a cache key and mirrored urls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstRemoteArtifact {
    /// The cache key.
    ///
    /// Used in place of the url for cache placement; the cached file lands at
    /// ``<cache_dir>/<key...>/<url file name>``.
    pub key: &'static [&'static str],

    /// Mirror urls; all must name the same file.
    pub urls: &'static [&'static str],
}

/// Where a model artifact comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactSource {
    /// A file shipped with the deployment.
    ///
    /// Provisioning only verifies that the file exists.
    Local(PathBuf),

    /// A file fetched once into the local cache.
    Remote {
        /// The cache key; see [`ConstRemoteArtifact::key`].
        key: Vec<String>,

        /// Mirror urls, tried in order.
        urls: Vec<String>,
    },
}

impl ArtifactSource {
    /// Build a [`ArtifactSource::Remote`] from mirror urls.
    pub fn remote<K, U>(
        key: &[K],
        urls: &[U],
    ) -> Self
    where
        K: AsRef<str>,
        U: AsRef<str>,
    {
        ArtifactSource::Remote {
            key: key.iter().map(|s| s.as_ref().to_string()).collect(),
            urls: urls.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Is this source fetched over the network?
    pub fn is_remote(&self) -> bool {
        matches!(self, ArtifactSource::Remote { .. })
    }
}

impl From<ConstRemoteArtifact> for ArtifactSource {
    fn from(artifact: ConstRemoteArtifact) -> Self {
        ArtifactSource::remote(artifact.key, artifact.urls)
    }
}

impl From<PathBuf> for ArtifactSource {
    fn from(path: PathBuf) -> Self {
        ArtifactSource::Local(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_remote_artifact() {
        let artifact = ConstRemoteArtifact {
            key: &["models", "decoder"],
            urls: &["https://example.com/decoder.onnx"],
        };

        let source: ArtifactSource = artifact.into();
        assert!(source.is_remote());
        assert_eq!(
            source,
            ArtifactSource::Remote {
                key: vec!["models".to_string(), "decoder".to_string()],
                urls: vec!["https://example.com/decoder.onnx".to_string()],
            }
        );

        let local: ArtifactSource = PathBuf::from("model.onnx").into();
        assert!(!local.is_remote());
    }
}
