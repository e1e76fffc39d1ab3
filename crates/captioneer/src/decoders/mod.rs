//! # Caption Decoders
//!
//! [`CaptionDecoder`] turns a [`FeatureVector`](crate::features::FeatureVector)
//! into a caption with greedy, bounded decoding over a
//! [`ScoringModel`](crate::session::ScoringModel).
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use captioneer::{
//!     decoders::{CaptionDecoder, DecoderOptions},
//!     features::FeatureVector,
//!     session::ScoringModel,
//!     vocab::WordVocab,
//! };
//!
//! fn example(
//!     vocab: Arc<WordVocab<u32>>,
//!     model: &dyn ScoringModel<u32>,
//! ) -> captioneer::CResult<String> {
//!     let decoder = CaptionDecoder::new(vocab, DecoderOptions::default())?;
//!     decoder.generate_caption(model, &FeatureVector::zeros(2048))
//! }
//! ```

mod caption_decoder;
mod decoder_options;
mod utility;

#[doc(inline)]
pub use caption_decoder::*;
#[doc(inline)]
pub use decoder_options::*;
#[doc(inline)]
pub use utility::*;
