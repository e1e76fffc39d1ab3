//! # `captioneer` Image Captioning
//!
//! Turns a single image into a short natural-language caption:
//!
//! 1. a [`features::FeatureExtractor`] reduces the image to a fixed-length
//!    [`features::FeatureVector`];
//! 2. a [`decoders::CaptionDecoder`] runs a greedy, bounded, word-by-word loop
//!    over a [`vocab::WordVocab`] and a [`session::ScoringModel`];
//! 3. the sentinel words are stripped and the rest joined into the caption.
//!
//! See:
//! * [`vocab`] for the word/id vocabulary and its persisted formats.
//! * [`session`] for the scoring model contract and its lazy, once-only session.
//! * [`artifacts`] for provisioning model files into the local cache.
//! * [`service`] for request validation and the [`service::CaptionService`] context.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use captioneer::{
//!     decoders::DecoderOptions,
//!     features::FixedVectorExtractor,
//!     service::{CaptionRequest, CaptionService},
//!     session::SessionCell,
//!     vocab::io::load_word_vocab_path,
//! };
//!
//! fn example(session: Arc<SessionCell<u32>>) -> captioneer::CResult<()> {
//!     let vocab = Arc::new(load_word_vocab_path::<u32, _>("tokenizer.json")?);
//!     let service = CaptionService::new(
//!         vocab,
//!         session,
//!         Arc::new(FixedVectorExtractor::zeros(2048)),
//!         DecoderOptions::default(),
//!     )?;
//!
//!     let response = service.handle(&CaptionRequest::json(
//!         br#"{"image": "data:image/png;base64,..."}"#,
//!     ));
//!     println!("{} {}", response.status, response.to_json());
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

pub mod artifacts;
pub mod decoders;
pub mod errors;
pub mod features;
pub mod service;
pub mod session;
pub mod types;
pub mod vocab;

#[cfg(feature = "download")]
#[doc(inline)]
pub use captioneer_disk_cache as disk_cache;

#[doc(inline)]
pub use errors::{CResult, CaptioneerError};
