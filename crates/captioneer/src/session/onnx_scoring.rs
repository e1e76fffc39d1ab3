//! # ONNX Runtime Scoring Model

use std::{fmt, marker::PhantomData, path::Path, sync::Arc};

use ndarray::Array2;
use ort::{session::Session, value::Tensor};
use parking_lot::Mutex;

use crate::{
    artifacts::ArtifactProvisioner,
    errors::{CResult, CaptioneerError},
    features::FeatureVector,
    session::{ScoringModel, SessionCell, SharedScoringModel},
    types::TokenType,
};

/// A [`ScoringModel`] backed by an ONNX Runtime session.
///
/// The model has two inputs, in order:
/// 1. image features, ``float32[1, feature_dim]``;
/// 2. padded word ids, ``int64[1, max_length]``.
///
/// The first output is flattened into the score vector.
pub struct OnnxScoringModel<T: TokenType> {
    session: Mutex<Session>,
    features_input: String,
    ids_input: String,
    _marker: PhantomData<T>,
}

impl<T: TokenType> fmt::Debug for OnnxScoringModel<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("OnnxScoringModel")
            .field("features_input", &self.features_input)
            .field("ids_input", &self.ids_input)
            .finish_non_exhaustive()
    }
}

impl<T: TokenType> OnnxScoringModel<T> {
    /// Load a decoder model.
    ///
    /// ## Errors
    /// * [`CaptioneerError::SessionInit`] if the file can not be loaded, or does
    ///   not have two inputs and at least one output.
    pub fn load<P: AsRef<Path>>(path: P) -> CResult<Self> {
        let path = path.as_ref();
        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| {
                CaptioneerError::SessionInit(format!(
                    "failed to load decoder {}: {e}",
                    path.display()
                ))
            })?;

        let (features_input, ids_input) = match session.inputs.as_slice() {
            [features, ids] => (features.name.clone(), ids.name.clone()),
            inputs => {
                return Err(CaptioneerError::SessionInit(format!(
                    "decoder must have 2 inputs, found {}",
                    inputs.len()
                )));
            }
        };
        if session.outputs.is_empty() {
            return Err(CaptioneerError::SessionInit(
                "decoder has no outputs".to_string(),
            ));
        }

        log::info!(
            "loaded decoder {} (inputs: {features_input}, {ids_input})",
            path.display()
        );
        Ok(Self {
            session: Mutex::new(session),
            features_input,
            ids_input,
            _marker: PhantomData,
        })
    }
}

fn inference_error(e: impl fmt::Display) -> CaptioneerError {
    CaptioneerError::Inference(e.to_string())
}

impl<T: TokenType> ScoringModel<T> for OnnxScoringModel<T> {
    fn score_next(
        &self,
        features: &FeatureVector,
        padded_ids: &[T],
    ) -> CResult<Vec<f32>> {
        let features = Array2::from_shape_vec((1, features.len()), features.as_slice().to_vec())
            .map_err(inference_error)?;

        let ids = padded_ids
            .iter()
            .map(|id| {
                id.to_i64()
                    .ok_or_else(|| inference_error(format!("id {id} exceeds int64")))
            })
            .collect::<CResult<Vec<i64>>>()?;
        let ids = Array2::from_shape_vec((1, ids.len()), ids).map_err(inference_error)?;

        let features = Tensor::from_array(features).map_err(inference_error)?;
        let ids = Tensor::from_array(ids).map_err(inference_error)?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![
                self.features_input.as_str() => features,
                self.ids_input.as_str() => ids,
            ])
            .map_err(inference_error)?;
        let (_shape, scores) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(inference_error)?;

        Ok(scores.to_vec())
    }
}

impl<T: TokenType> SessionCell<T> {
    /// Construct a cell which provisions, then loads, an [`OnnxScoringModel`].
    pub fn onnx(provisioner: ArtifactProvisioner) -> Self {
        Self::from_provisioner(provisioner, |path| {
            let model: SharedScoringModel<T> = Arc::new(OnnxScoringModel::<T>::load(path)?);
            Ok(model)
        })
    }
}
