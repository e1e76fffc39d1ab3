//! # Feature Vectors

use serde::{Deserialize, Serialize};

use crate::errors::{CResult, CaptioneerError};

/// The default encoder input edge, in pixels.
pub const DEFAULT_IMAGE_SIZE: u32 = 299;

/// The default feature vector dimensionality.
pub const DEFAULT_FEATURE_DIM: usize = 2048;

/// A fixed-length numeric summary of one image.
///
/// Produced once per request; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Wrap a vector of features.
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// An all-zero vector of `dim` features.
    pub fn zeros(dim: usize) -> Self {
        Self(vec![0.0; dim])
    }

    /// The number of features.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is the vector empty?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The features, as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Unwrap into the inner vector.
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// The fixed contract between a feature extractor and the scoring model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSpec {
    /// Encoder input edge; images are resized to ``image_size x image_size``.
    pub image_size: u32,

    /// Length of every produced [`FeatureVector`].
    pub feature_dim: usize,
}

impl Default for FeatureSpec {
    fn default() -> Self {
        Self {
            image_size: DEFAULT_IMAGE_SIZE,
            feature_dim: DEFAULT_FEATURE_DIM,
        }
    }
}

impl FeatureSpec {
    /// Sets the encoder input edge.
    pub fn with_image_size(
        mut self,
        image_size: u32,
    ) -> Self {
        self.image_size = image_size;
        self
    }

    /// Sets the feature vector dimensionality.
    pub fn with_feature_dim(
        mut self,
        feature_dim: usize,
    ) -> Self {
        self.feature_dim = feature_dim;
        self
    }

    /// Check that `features` has the contracted length.
    ///
    /// ## Errors
    /// * [`CaptioneerError::FeatureExtraction`] on a length mismatch.
    pub fn check(
        &self,
        features: &FeatureVector,
    ) -> CResult<()> {
        if features.len() != self.feature_dim {
            return Err(CaptioneerError::FeatureExtraction(format!(
                "expected {} features, got {}",
                self.feature_dim,
                features.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_spec_defaults() {
        let spec: FeatureSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(spec, FeatureSpec::default());
        assert_eq!(spec.image_size, 299);
        assert_eq!(spec.feature_dim, 2048);

        let spec: FeatureSpec = serde_json::from_str(r#"{"feature_dim": 4}"#).unwrap();
        assert_eq!(spec, FeatureSpec::default().with_feature_dim(4));
    }

    #[test]
    fn test_check() {
        let spec = FeatureSpec::default().with_feature_dim(3);
        assert!(spec.check(&FeatureVector::zeros(3)).is_ok());
        assert!(matches!(
            spec.check(&FeatureVector::new(vec![1.0; 4])),
            Err(CaptioneerError::FeatureExtraction(_))
        ));
    }
}
