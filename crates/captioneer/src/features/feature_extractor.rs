//! # Feature Extractors

use image::DynamicImage;

use crate::{errors::CResult, features::FeatureVector};

/// Reduces a decoded image to a fixed-length [`FeatureVector`].
///
/// Implementations are shared across concurrent requests.
pub trait FeatureExtractor: Send + Sync {
    /// Extract features from `image`.
    ///
    /// ## Errors
    /// * [`CaptioneerError::FeatureExtraction`](crate::CaptioneerError::FeatureExtraction)
    ///   when the encoder fails.
    fn extract(
        &self,
        image: &DynamicImage,
    ) -> CResult<FeatureVector>;
}

/// A [`FeatureExtractor`] which ignores the image and returns a fixed vector.
///
/// [`FixedVectorExtractor::zeros`] is the placeholder encoder of a deployment
/// without a real image encoder; tests use [`FixedVectorExtractor::new`] to
/// inject deterministic features.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedVectorExtractor {
    features: FeatureVector,
}

impl FixedVectorExtractor {
    /// Always return `features`.
    pub fn new<V: Into<FeatureVector>>(features: V) -> Self {
        Self {
            features: features.into(),
        }
    }

    /// Always return a zero vector of `dim` features.
    pub fn zeros(dim: usize) -> Self {
        Self::new(FeatureVector::zeros(dim))
    }

    /// The returned features.
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }
}

impl FeatureExtractor for FixedVectorExtractor {
    fn extract(
        &self,
        _image: &DynamicImage,
    ) -> CResult<FeatureVector> {
        Ok(self.features.clone())
    }
}
