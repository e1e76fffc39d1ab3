//! # Vocabulary
//!
//! This module provides the word vocabulary and related io mechanisms.
//!
//! The primary vocabulary is [`WordVocab`], a bidirectional ``{ word <-> id }``
//! mapping built once at startup from a persisted word index.
//!
//! Persisted formats are handled by [`io`]:
//! * plain JSON ``{ "word": id }`` objects,
//! * Keras tokenizer JSON exports,
//! * ``{BASE64 WORD} {ID}`` line files.
pub mod io;
pub mod word_vocab;

#[doc(inline)]
pub use word_vocab::WordVocab;
