//! # JSON Vocabulary IO
//!
//! Two JSON layouts are accepted:
//!
//! * a plain word index: ``{"start": 1, "end": 2, ...}``
//! * a Keras tokenizer export (``tokenizer.to_json()``), where
//!   ``config.word_index`` is an object or a JSON-encoded string, and
//!   ``config.num_words`` / ``config.oov_token`` are honoured.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use serde::Deserialize;

use crate::{
    errors::{CResult, CaptioneerError},
    types::TokenType,
    vocab::WordVocab,
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VocabJson {
    Keras { config: KerasTokenizerConfig },
    Plain(BTreeMap<String, u64>),
}

#[derive(Debug, Deserialize)]
struct KerasTokenizerConfig {
    word_index: WordIndexJson,

    #[serde(default)]
    num_words: Option<usize>,

    #[serde(default)]
    oov_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordIndexJson {
    Map(BTreeMap<String, u64>),
    Encoded(String),
}

impl WordIndexJson {
    fn into_map(self) -> CResult<BTreeMap<String, u64>> {
        match self {
            WordIndexJson::Map(map) => Ok(map),
            WordIndexJson::Encoded(s) => Ok(serde_json::from_str(&s)?),
        }
    }
}

/// Load a [`WordVocab`] from a JSON vocab file.
pub fn load_json_word_vocab_path<T, P>(path: P) -> CResult<WordVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    read_json_word_vocab(reader)
}

/// Read a [`WordVocab`] from JSON.
///
/// ## Errors
/// * [`CaptioneerError::Parse`] for malformed JSON or out-of-range ids.
/// * [`CaptioneerError::VocabConflict`] when two words share an id.
pub fn read_json_word_vocab<T, R>(reader: R) -> CResult<WordVocab<T>>
where
    T: TokenType,
    R: Read,
{
    let (word_index, num_words, oov_token) = match serde_json::from_reader(reader)? {
        VocabJson::Keras { config } => (
            config.word_index.into_map()?,
            config.num_words,
            config.oov_token,
        ),
        VocabJson::Plain(map) => (map, None, None),
    };

    let entries = word_index
        .into_iter()
        .map(|(word, id)| {
            T::from_u64(id)
                .map(|id| (word, id))
                .ok_or_else(|| CaptioneerError::Parse(format!("id {id} is out of range")))
        })
        .collect::<CResult<Vec<_>>>()?;

    WordVocab::from_word_index(entries)?
        .with_num_words(num_words)
        .with_oov_token(oov_token)
}
