//! # Inference Sessions
//!
//! A [`ScoringModel`] scores the next word given image features and the
//! padded word ids so far. A [`SessionCell`] builds one lazily, exactly once,
//! and shares it across requests.
//!
//! With the `onnx` feature, `OnnxScoringModel` runs an exported decoder
//! through ONNX Runtime, and `SessionCell::onnx` wires it to an
//! [`ArtifactProvisioner`](crate::artifacts::ArtifactProvisioner).

#[cfg(feature = "onnx")]
mod onnx_scoring;
mod scoring_model;
mod session_cell;

#[cfg(feature = "onnx")]
#[doc(inline)]
pub use onnx_scoring::*;
#[doc(inline)]
pub use scoring_model::*;
#[doc(inline)]
pub use session_cell::*;
