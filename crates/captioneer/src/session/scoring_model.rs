//! # Scoring Model

use crate::{errors::CResult, features::FeatureVector, types::TokenType};

/// A loaded next-word scoring model.
///
/// `score_next` must be a pure function of its two inputs; implementations
/// hold no per-request state, and are shared across concurrent requests.
pub trait ScoringModel<T: TokenType>: Send + Sync {
    /// Score every vocabulary id as the next word.
    ///
    /// ## Arguments
    /// * `features` - the image features.
    /// * `padded_ids` - the word ids so far, padded to the decoder's `max_length`.
    ///
    /// ## Returns
    /// One score per id; index `i` scores id `i`.
    ///
    /// ## Errors
    /// * [`CaptioneerError::Inference`](crate::CaptioneerError::Inference)
    ///   if the backend fails.
    fn score_next(
        &self,
        features: &FeatureVector,
        padded_ids: &[T],
    ) -> CResult<Vec<f32>>;
}
