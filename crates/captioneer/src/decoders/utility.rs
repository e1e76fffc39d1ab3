//! # Decoding Utilities

/// Left-pad or truncate `ids` to exactly `max_length`.
///
/// * Shorter sequences are left-padded with `pad_id`.
/// * Longer sequences keep their last `max_length` ids.
pub fn pad_sequence<T: Copy>(
    ids: &[T],
    max_length: usize,
    pad_id: T,
) -> Vec<T> {
    let kept = &ids[ids.len().saturating_sub(max_length)..];

    let mut padded = Vec::with_capacity(max_length);
    padded.resize(max_length - kept.len(), pad_id);
    padded.extend_from_slice(kept);
    padded
}

/// The index of the first maximum score.
///
/// NaN scores never win; returns `None` for an empty (or all-NaN) slice.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Strip one leading `start` and one trailing `end` sentinel.
///
/// A sentinel word generated inside the caption is kept; a sequence
/// without sentinels at its ends is returned unchanged.
pub fn strip_sentinels<'a, S: AsRef<str>>(
    tokens: &'a [S],
    start: &str,
    end: &str,
) -> &'a [S] {
    let mut tokens = tokens;
    if let [first, rest @ ..] = tokens
        && first.as_ref() == start
    {
        tokens = rest;
    }
    if let [rest @ .., last] = tokens
        && last.as_ref() == end
    {
        tokens = rest;
    }
    tokens
}

/// Strip sentinels, and join the remaining words with single spaces.
pub fn caption_from_tokens<S: AsRef<str>>(
    tokens: &[S],
    start: &str,
    end: &str,
) -> String {
    let words: Vec<&str> = strip_sentinels(tokens, start, end)
        .iter()
        .map(|t| t.as_ref())
        .collect();
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_sequence() {
        assert_eq!(pad_sequence(&[1u32, 2], 4, 0), vec![0, 0, 1, 2]);
        assert_eq!(pad_sequence(&[1u32, 2, 3, 4], 4, 0), vec![1, 2, 3, 4]);
        assert_eq!(pad_sequence(&[1u32, 2, 3, 4, 5, 6], 4, 0), vec![3, 4, 5, 6]);
        assert_eq!(pad_sequence::<u32>(&[], 3, 7), vec![7, 7, 7]);
        assert!(pad_sequence(&[1u32], 0, 0).is_empty());
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.5, 0.9, 0.9, 0.1]), Some(1));
        assert_eq!(argmax(&[f32::NAN, 0.2, f32::NAN, 0.3]), Some(3));
        assert_eq!(argmax(&[-3.0, -1.0, f32::NEG_INFINITY]), Some(1));
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[f32::NAN]), None);
    }

    #[test]
    fn test_strip_sentinels() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["start", "a", "dog", "end"], &["a", "dog"]),
            (&["start", "a", "dog"], &["a", "dog"]),
            (&["a", "dog", "end"], &["a", "dog"]),
            (&["a", "dog"], &["a", "dog"]),
            (&["start", "end"], &[]),
            (&["start", "start", "a", "end", "end"], &["start", "a", "end"]),
            (&[], &[]),
        ];
        for &(tokens, expected) in cases {
            assert_eq!(strip_sentinels(tokens, "start", "end"), expected, "{tokens:?}");
        }

        let bare: &[&str] = &["a", "dog"];
        assert_eq!(strip_sentinels(bare, "start", "end"), bare);
    }

    #[test]
    fn test_caption_from_tokens() {
        let tokens = ["start", "a", "dog", "runs", "end"];
        assert_eq!(caption_from_tokens(&tokens, "start", "end"), "a dog runs");
        assert_eq!(caption_from_tokens(&["start", "end"], "start", "end"), "");
    }
}
