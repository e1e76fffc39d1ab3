//! # Feature Extraction
//!
//! A [`FeatureExtractor`] reduces a decoded image to a [`FeatureVector`] of
//! [`FeatureSpec::feature_dim`] values.
//!
//! * [`FixedVectorExtractor`] - returns a fixed vector; the all-zero variant
//!   stands in when no encoder model is deployed.
//! * `OnnxImageEncoder` - runs an ONNX encoder over [`preprocess_image`] output;
//!   requires the `onnx` feature.

mod feature_extractor;
mod feature_vector;
#[cfg(feature = "onnx")]
mod onnx_encoder;
mod preprocess;

#[doc(inline)]
pub use feature_extractor::*;
#[doc(inline)]
pub use feature_vector::*;
#[cfg(feature = "onnx")]
#[doc(inline)]
pub use onnx_encoder::*;
#[doc(inline)]
pub use preprocess::*;
