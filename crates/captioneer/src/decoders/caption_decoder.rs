//! # Greedy Caption Decoder

use std::sync::Arc;

use crate::{
    decoders::{DecoderOptions, argmax, caption_from_tokens, pad_sequence},
    errors::{CResult, CaptioneerError},
    features::FeatureVector,
    session::ScoringModel,
    types::TokenType,
    vocab::WordVocab,
};

/// Why decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// The end sentinel was produced.
    EndToken,

    /// The best id has no word in the vocabulary.
    UnknownToken,

    /// The token sequence reached `max_length`.
    LengthBound,
}

/// The result of one decode.
///
/// Every halt reason yields a usable, possibly empty, token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// The raw token sequence, starting with the start sentinel.
    pub tokens: Vec<String>,

    /// Why decoding stopped.
    pub halt: HaltReason,

    /// The number of scoring calls made.
    pub steps: usize,
}

/// A greedy, bounded, word-by-word caption decoder.
///
/// Starting from ``[start]``, each step pads the current ids, scores the next
/// word, and appends the best scoring word; until the end sentinel, an unknown
/// id, or a token sequence of `max_length` words.
#[derive(Debug, Clone)]
pub struct CaptionDecoder<T: TokenType> {
    vocab: Arc<WordVocab<T>>,
    options: DecoderOptions,
    pad_id: T,
}

impl<T: TokenType> CaptionDecoder<T> {
    /// Construct a decoder.
    ///
    /// ## Errors
    /// * [`CaptioneerError::Parse`] if `options.pad_id` does not fit `T`.
    pub fn new(
        vocab: Arc<WordVocab<T>>,
        options: DecoderOptions,
    ) -> CResult<Self> {
        let pad_id = T::from_u64(options.pad_id).ok_or_else(|| {
            CaptioneerError::Parse(format!("pad id {} is out of range", options.pad_id))
        })?;

        for sentinel in [&options.start_token, &options.end_token] {
            if !vocab.contains_word(sentinel) {
                log::warn!("sentinel {sentinel:?} is not in the vocabulary");
            }
        }

        Ok(Self {
            vocab,
            options,
            pad_id,
        })
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Arc<WordVocab<T>> {
        &self.vocab
    }

    /// The decoder options.
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Run the decode loop.
    ///
    /// Makes at most ``max_length - 1`` scoring calls.
    ///
    /// ## Errors
    /// Only errors from `model` are returned; the loop itself always terminates
    /// with a [`DecodeOutcome`].
    pub fn generate(
        &self,
        model: &dyn ScoringModel<T>,
        features: &FeatureVector,
    ) -> CResult<DecodeOutcome> {
        let max_length = self.options.max_length;
        let mut tokens = vec![self.options.start_token.clone()];
        let mut steps = 0;

        let halt = loop {
            if tokens.len() >= max_length {
                break HaltReason::LengthBound;
            }

            let ids = self.vocab.ids_for_words(&tokens);
            let padded = pad_sequence(&ids, max_length, self.pad_id);

            let scores = model.score_next(features, &padded)?;
            steps += 1;

            let word = argmax(&scores)
                .and_then(T::from_usize)
                .and_then(|id| self.vocab.word_for_id(id));
            let Some(word) = word else {
                break HaltReason::UnknownToken;
            };

            tokens.push(word.to_string());
            if word == self.options.end_token {
                break HaltReason::EndToken;
            }
        };

        log::debug!("decode halted ({halt:?}) after {steps} steps");
        Ok(DecodeOutcome {
            tokens,
            halt,
            steps,
        })
    }

    /// The caption for a decoded token sequence.
    pub fn caption(
        &self,
        outcome: &DecodeOutcome,
    ) -> String {
        caption_from_tokens(
            &outcome.tokens,
            &self.options.start_token,
            &self.options.end_token,
        )
    }

    /// Decode `features`, and post-process into a caption.
    pub fn generate_caption(
        &self,
        model: &dyn ScoringModel<T>,
        features: &FeatureVector,
    ) -> CResult<String> {
        let outcome = self.generate(model, features)?;
        Ok(self.caption(&outcome))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    type T = u32;

    const END: usize = 2;

    fn vocab() -> Arc<WordVocab<T>> {
        Arc::new(
            WordVocab::from_word_index([
                ("start", 1),
                ("end", 2),
                ("a", 3),
                ("dog", 4),
                ("runs", 5),
            ])
            .unwrap(),
        )
    }

    /// Picks the next id from the number of non-pad ids; pure over its inputs.
    struct ScriptedModel {
        script: Vec<usize>,
        width: usize,
        calls: Mutex<Vec<Vec<T>>>,
    }

    impl ScriptedModel {
        fn new(script: &[usize]) -> Self {
            Self {
                script: script.to_vec(),
                width: 8,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<T>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ScoringModel<T> for ScriptedModel {
        fn score_next(
            &self,
            _features: &FeatureVector,
            padded_ids: &[T],
        ) -> CResult<Vec<f32>> {
            self.calls.lock().unwrap().push(padded_ids.to_vec());

            let step = padded_ids.iter().filter(|&&id| id != 0).count() - 1;
            let best = self.script[step.min(self.script.len() - 1)];

            let mut scores = vec![0.0; self.width.max(best + 1)];
            scores[best] = 1.0;
            Ok(scores)
        }
    }

    struct FailingModel;

    impl ScoringModel<T> for FailingModel {
        fn score_next(
            &self,
            _features: &FeatureVector,
            _padded_ids: &[T],
        ) -> CResult<Vec<f32>> {
            Err(CaptioneerError::Inference("backend down".to_string()))
        }
    }

    fn decoder(max_length: usize) -> CaptionDecoder<T> {
        CaptionDecoder::new(vocab(), DecoderOptions::default().with_max_length(max_length)).unwrap()
    }

    #[test]
    fn test_immediate_end() {
        let model = ScriptedModel::new(&[END]);
        let outcome = decoder(32).generate(&model, &FeatureVector::zeros(4)).unwrap();

        assert_eq!(outcome.tokens, vec!["start", "end"]);
        assert_eq!(outcome.halt, HaltReason::EndToken);
        assert_eq!(outcome.steps, 1);
        assert_eq!(decoder(32).caption(&outcome), "");
    }

    #[test]
    fn test_sentence() {
        let model = ScriptedModel::new(&[3, 4, 5, END]);
        let dec = decoder(6);
        let outcome = dec.generate(&model, &FeatureVector::zeros(4)).unwrap();

        assert_eq!(outcome.halt, HaltReason::EndToken);
        assert_eq!(outcome.steps, 4);
        assert_eq!(dec.caption(&outcome), "a dog runs");

        assert_eq!(
            model.calls(),
            vec![
                vec![0, 0, 0, 0, 0, 1],
                vec![0, 0, 0, 0, 1, 3],
                vec![0, 0, 0, 1, 3, 4],
                vec![0, 0, 1, 3, 4, 5],
            ]
        );
    }

    #[test]
    fn test_generated_start_word_is_kept() {
        let model = ScriptedModel::new(&[1, 3, END]);
        let dec = decoder(32);
        let outcome = dec.generate(&model, &FeatureVector::zeros(4)).unwrap();

        assert_eq!(outcome.tokens, vec!["start", "start", "a", "end"]);
        assert_eq!(outcome.halt, HaltReason::EndToken);
        assert_eq!(dec.caption(&outcome), "start a");
    }

    #[test]
    fn test_length_bound() {
        let max_length = 5;
        let model = ScriptedModel::new(&[4]);
        let dec = decoder(max_length);
        let outcome = dec.generate(&model, &FeatureVector::zeros(4)).unwrap();

        assert_eq!(outcome.halt, HaltReason::LengthBound);
        assert_eq!(outcome.tokens.len(), max_length);
        assert_eq!(outcome.steps, max_length - 1);

        let caption = dec.caption(&outcome);
        assert_eq!(caption.split(' ').count(), max_length - 1);
        assert!(caption.split(' ').all(|w| w == "dog"));

        assert!(model.calls().iter().all(|ids| ids.len() == max_length));
    }

    #[test]
    fn test_unknown_token() {
        let model = ScriptedModel::new(&[3, 7]);
        let outcome = decoder(32).generate(&model, &FeatureVector::zeros(4)).unwrap();

        assert_eq!(outcome.tokens, vec!["start", "a"]);
        assert_eq!(outcome.halt, HaltReason::UnknownToken);
        assert_eq!(outcome.steps, 2);
    }

    #[test]
    fn test_empty_scores_halt() {
        struct EmptyModel;
        impl ScoringModel<T> for EmptyModel {
            fn score_next(
                &self,
                _features: &FeatureVector,
                _padded_ids: &[T],
            ) -> CResult<Vec<f32>> {
                Ok(Vec::new())
            }
        }

        let outcome = decoder(32).generate(&EmptyModel, &FeatureVector::zeros(4)).unwrap();
        assert_eq!(outcome.halt, HaltReason::UnknownToken);
        assert_eq!(outcome.tokens, vec!["start"]);
    }

    #[test]
    fn test_degenerate_lengths() {
        for max_length in [0, 1] {
            let model = ScriptedModel::new(&[3]);
            let outcome = decoder(max_length)
                .generate(&model, &FeatureVector::zeros(4))
                .unwrap();
            assert_eq!(outcome.halt, HaltReason::LengthBound);
            assert_eq!(outcome.steps, 0);
            assert!(model.calls().is_empty());
        }
    }

    #[test]
    fn test_deterministic() {
        let model = ScriptedModel::new(&[3, 4, 4, 5, END]);
        let dec = decoder(32);
        let features = FeatureVector::new(vec![0.25; 4]);

        let first = dec.generate(&model, &features).unwrap();
        for _ in 0..4 {
            assert_eq!(dec.generate(&model, &features).unwrap(), first);
        }
    }

    #[test]
    fn test_terminates_for_any_script() {
        let max_length = 10;
        let dec = decoder(max_length);
        for best in 0..12 {
            let model = ScriptedModel::new(&[best]);
            let outcome = dec.generate(&model, &FeatureVector::zeros(4)).unwrap();
            assert!(outcome.steps < max_length);
            assert!(outcome.tokens.len() <= max_length);
        }
    }

    #[test]
    fn test_model_errors_propagate() {
        let err = decoder(32)
            .generate(&FailingModel, &FeatureVector::zeros(4))
            .unwrap_err();
        assert!(matches!(err, CaptioneerError::Inference(_)));
    }

    #[test]
    fn test_pad_id_range() {
        let options = DecoderOptions::default().with_pad_id(u64::MAX);
        assert!(matches!(
            CaptionDecoder::new(vocab(), options),
            Err(CaptioneerError::Parse(_))
        ));
    }
}
