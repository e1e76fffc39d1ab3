//! # Base64 Vocabulary IO

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};

use crate::{
    errors::{CResult, CaptioneerError},
    types::TokenType,
    vocab::WordVocab,
};

/// Load a [`WordVocab`] from a base64 vocab file.
///
/// Lines are:
/// ```terminaloutput
/// {BASE64 WORD} {ID}
/// ```
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_base64_word_vocab_path<T, P>(path: P) -> CResult<WordVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    read_base64_word_vocab(reader)
}

/// Read a [`WordVocab`] from a base64 vocab line reader.
///
/// Lines are:
/// ```terminaloutput
/// {BASE64 WORD} {ID}
/// ```
///
/// Blank lines are ignored.
///
/// # Arguments
/// * `reader` - the line reader.
pub fn read_base64_word_vocab<T, R>(reader: R) -> CResult<WordVocab<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut entries: Vec<(String, T)> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let s = line.trim_end();
        if s.is_empty() {
            continue;
        }

        let (encoded, id) = s.split_once(' ').ok_or_else(|| {
            CaptioneerError::Parse(format!("line {}: expected `{{word}} {{id}}`", idx + 1))
        })?;

        let word = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| CaptioneerError::Parse(format!("line {}: {e}", idx + 1)))?;
        let word = String::from_utf8(word)
            .map_err(|e| CaptioneerError::Parse(format!("line {}: {e}", idx + 1)))?;

        let id: u64 = id
            .parse()
            .map_err(|e: core::num::ParseIntError| {
                CaptioneerError::Parse(format!("line {}: {e}", idx + 1))
            })?;
        let id = T::from_u64(id)
            .ok_or_else(|| CaptioneerError::Parse(format!("line {}: id out of range", idx + 1)))?;

        entries.push((word, id));
    }

    WordVocab::from_word_index(entries)
}

/// Save a [`WordVocab`] to a base64 vocab file.
///
/// Lines are:
/// ```terminaloutput
/// {BASE64 WORD} {ID}
/// ```
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_base64_word_vocab_path<T: TokenType, P: AsRef<Path>>(
    vocab: &WordVocab<T>,
    path: P,
) -> CResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_base64_word_vocab(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a [`WordVocab`] to a [`Write`] writer, sorted by id.
///
/// Lines are:
/// ```terminaloutput
/// {BASE64 WORD} {ID}
/// ```
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `writer` - the writer to target.
pub fn write_base64_word_vocab<T, W>(
    vocab: &WordVocab<T>,
    writer: &mut W,
) -> CResult<()>
where
    T: TokenType,
    W: Write,
{
    for (id, word) in vocab.sorted_entries() {
        writeln!(writer, "{} {}", BASE64_STANDARD.encode(word), id)?;
    }

    Ok(())
}
