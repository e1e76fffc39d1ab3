//! # Vocabulary IO
//!
//! ## Loading A Vocab
//!
//! ```rust,no_run
//! use captioneer::vocab::{WordVocab, io::load_word_vocab_path};
//!
//! fn example() -> captioneer::CResult<WordVocab<u32>> {
//!     // Either a JSON word index, a Keras tokenizer export,
//!     // or a base64 line file; detected from the content.
//!     load_word_vocab_path("tokenizer.json")
//! }
//! ```

mod base64_vocab;
mod json_vocab;

use std::{fs, path::Path};

#[doc(inline)]
pub use base64_vocab::*;
#[doc(inline)]
pub use json_vocab::*;

use crate::{errors::CResult, types::TokenType, vocab::WordVocab};

/// Load a [`WordVocab`] from a file in any supported format.
///
/// Files whose first non-whitespace character is ``{`` are read as JSON;
/// anything else as base64 lines.
pub fn load_word_vocab_path<T, P>(path: P) -> CResult<WordVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let content = fs::read(path)?;
    let is_json = content
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'{');

    let vocab = if is_json {
        read_json_word_vocab(content.as_slice())?
    } else {
        read_base64_word_vocab(content.as_slice())?
    };

    log::info!("loaded vocabulary of {} words", vocab.len());
    Ok(vocab)
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_load_detects_format() {
        type T = u32;
        let vocab: WordVocab<T> =
            WordVocab::from_word_index([("start", 1), ("end", 2), ("two words", 3)]).unwrap();

        let dir = TempDir::new("vocab_test").unwrap();

        let b64_path = dir.path().join("vocab.b64");
        save_base64_word_vocab_path(&vocab, &b64_path).unwrap();

        let json_path = dir.path().join("vocab.json");
        fs::write(&json_path, r#"  {"start": 1, "end": 2, "two words": 3}"#).unwrap();

        for path in [b64_path, json_path] {
            let loaded: WordVocab<T> = load_word_vocab_path(&path).unwrap();
            assert_eq!(loaded.sorted_entries(), vocab.sorted_entries());
        }

        assert!(load_word_vocab_path::<T, _>(dir.path().join("missing.json")).is_err());
    }
}
