//! # Word Vocabulary

use crate::{
    errors::{CResult, CaptioneerError},
    types::{CapHashMap, TokenType, hash_map_with_capacity},
};

/// Bidirectional ``{ word <-> id }`` vocabulary.
///
/// Built once from persisted training-time data; immutable afterwards.
/// Both directions are indexed, so each lookup is a single hash probe.
///
/// Ids are positive by convention; id `0` is normally the padding id,
/// and is not assigned to any word.
#[derive(Debug, Clone)]
pub struct WordVocab<T: TokenType> {
    word_index: CapHashMap<String, T>,
    index_word: CapHashMap<T, String>,

    /// When set, only ids `< num_words` are produced by [`WordVocab::ids_for_words`].
    num_words: Option<usize>,

    /// When set, unknown words map to this word's id instead of being dropped.
    oov_token: Option<String>,
}

impl<T: TokenType> WordVocab<T> {
    /// Build a vocabulary from ``(word, id)`` entries.
    ///
    /// ## Errors
    /// * [`CaptioneerError::VocabConflict`] if one id is assigned to two words,
    ///   or one word to two ids.
    pub fn from_word_index<I, S>(entries: I) -> CResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        let entries = entries.into_iter();
        let (lower, _) = entries.size_hint();
        let mut word_index: CapHashMap<String, T> = hash_map_with_capacity(lower);
        let mut index_word: CapHashMap<T, String> = hash_map_with_capacity(lower);

        for (word, id) in entries {
            let word = word.into();

            if let Some(&prev) = word_index.get(&word) {
                if prev == id {
                    continue;
                }
                return Err(CaptioneerError::VocabConflict(format!(
                    "word {word:?} is assigned ids {prev} and {id}"
                )));
            }
            if let Some(prev) = index_word.get(&id) {
                return Err(CaptioneerError::VocabConflict(format!(
                    "id {id} is assigned to words {prev:?} and {word:?}"
                )));
            }

            index_word.insert(id, word.clone());
            word_index.insert(word, id);
        }

        Ok(Self {
            word_index,
            index_word,
            num_words: None,
            oov_token: None,
        })
    }

    /// Limit the ids produced by [`WordVocab::ids_for_words`] to `< num_words`.
    pub fn with_num_words(
        mut self,
        num_words: Option<usize>,
    ) -> Self {
        self.num_words = num_words;
        self
    }

    /// Map unknown words to the id of `oov_token`.
    ///
    /// ## Errors
    /// * [`CaptioneerError::VocabConflict`] if `oov_token` is not in the vocabulary.
    pub fn with_oov_token(
        mut self,
        oov_token: Option<String>,
    ) -> CResult<Self> {
        if let Some(token) = &oov_token
            && !self.word_index.contains_key(token)
        {
            return Err(CaptioneerError::VocabConflict(format!(
                "oov token {token:?} is not in the vocabulary"
            )));
        }
        self.oov_token = oov_token;
        Ok(self)
    }

    /// The number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.word_index.is_empty()
    }

    /// The largest assigned id, if any.
    pub fn max_id(&self) -> Option<T> {
        self.index_word.keys().max().copied()
    }

    /// The configured `num_words` limit.
    pub fn num_words(&self) -> Option<usize> {
        self.num_words
    }

    /// The configured out-of-vocabulary word.
    pub fn oov_token(&self) -> Option<&str> {
        self.oov_token.as_deref()
    }

    /// The forward ``{ word -> id }`` map.
    pub fn word_index(&self) -> &CapHashMap<String, T> {
        &self.word_index
    }

    /// Look up the word assigned to `id`.
    ///
    /// ## Returns
    /// `None` when no word has this id; the caller treats that as an unknown token.
    pub fn word_for_id(
        &self,
        id: T,
    ) -> Option<&str> {
        self.index_word.get(&id).map(String::as_str)
    }

    /// Look up the id assigned to `word`.
    pub fn id_for_word(
        &self,
        word: &str,
    ) -> Option<T> {
        self.word_index.get(word).copied()
    }

    /// Does the vocabulary contain `word`?
    pub fn contains_word(
        &self,
        word: &str,
    ) -> bool {
        self.word_index.contains_key(word)
    }

    /// Map a word sequence to ids.
    ///
    /// * Unknown words map to the oov id, if one is set; else they are dropped.
    /// * Known ids `>= num_words`, if a limit is set, are treated as unknown.
    /// * The oov id itself is not limited by `num_words`.
    pub fn ids_for_words<S: AsRef<str>>(
        &self,
        words: &[S],
    ) -> Vec<T> {
        let oov = self
            .oov_token
            .as_deref()
            .and_then(|token| self.id_for_word(token));

        words
            .iter()
            .filter_map(|word| {
                self.id_for_word(word.as_ref())
                    .filter(|&id| self.within_num_words(id))
                    .or(oov)
            })
            .collect()
    }

    fn within_num_words(
        &self,
        id: T,
    ) -> bool {
        match self.num_words {
            Some(limit) => id.to_usize().is_some_and(|id| id < limit),
            None => true,
        }
    }

    /// All ``(id, word)`` entries, sorted by id.
    pub fn sorted_entries(&self) -> Vec<(T, &str)> {
        let mut entries: Vec<(T, &str)> = self
            .index_word
            .iter()
            .map(|(&id, word)| (id, word.as_str()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type T = u32;

    fn sample() -> WordVocab<T> {
        WordVocab::from_word_index([
            ("start", 1),
            ("end", 2),
            ("a", 3),
            ("dog", 4),
            ("runs", 5),
            ("<unk>", 6),
        ])
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let vocab = sample();
        assert_eq!(vocab.len(), 6);
        assert!(!vocab.is_empty());
        assert_eq!(vocab.max_id(), Some(6));

        for (word, &id) in vocab.word_index().iter() {
            assert_eq!(vocab.word_for_id(id), Some(word.as_str()));
            assert_eq!(vocab.id_for_word(word), Some(id));
        }
    }

    #[test]
    fn test_unknown_ids() {
        let vocab = sample();
        assert_eq!(vocab.word_for_id(0), None);
        assert_eq!(vocab.word_for_id(7), None);
        assert_eq!(vocab.word_for_id(T::MAX), None);
        assert_eq!(vocab.id_for_word("cat"), None);
        assert!(!vocab.contains_word("cat"));
    }

    #[test]
    fn test_conflicts() {
        let err = WordVocab::<T>::from_word_index([("a", 1), ("b", 1)]).unwrap_err();
        assert!(matches!(err, CaptioneerError::VocabConflict(_)));

        let err = WordVocab::<T>::from_word_index([("a", 1), ("a", 2)]).unwrap_err();
        assert!(matches!(err, CaptioneerError::VocabConflict(_)));

        // Repeats of the same entry are fine.
        let vocab = WordVocab::<T>::from_word_index([("a", 1), ("a", 1)]).unwrap();
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_ids_for_words() {
        let vocab = sample();
        assert_eq!(
            vocab.ids_for_words(&["start", "a", "cat", "dog"]),
            vec![1, 3, 4]
        );

        let empty: &[&str] = &[];
        assert!(vocab.ids_for_words(empty).is_empty());
    }

    #[test]
    fn test_num_words() {
        let vocab = sample().with_num_words(Some(4));
        assert_eq!(
            vocab.ids_for_words(&["start", "a", "dog", "runs"]),
            vec![1, 3]
        );
        // Reverse lookups ignore the limit.
        assert_eq!(vocab.word_for_id(5), Some("runs"));
    }

    #[test]
    fn test_oov_token() {
        let vocab = sample().with_oov_token(Some("<unk>".to_string())).unwrap();
        assert_eq!(vocab.oov_token(), Some("<unk>"));
        assert_eq!(vocab.ids_for_words(&["a", "cat"]), vec![3, 6]);

        assert!(sample().with_oov_token(Some("<oov>".to_string())).is_err());
    }

    #[test]
    fn test_num_words_with_oov_token() {
        let vocab = sample()
            .with_num_words(Some(4))
            .with_oov_token(Some("<unk>".to_string()))
            .unwrap();

        // Known words over the limit map to the oov id, like unknown words.
        assert_eq!(
            vocab.ids_for_words(&["start", "a", "dog", "runs", "cat"]),
            vec![1, 3, 6, 6, 6]
        );
    }

    #[test]
    fn test_sorted_entries() {
        let vocab = sample();
        let entries = vocab.sorted_entries();
        assert_eq!(entries.first(), Some(&(1, "start")));
        assert_eq!(entries.last(), Some(&(6, "<unk>")));
        assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
