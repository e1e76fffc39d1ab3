//! Caption Decoder Options
//!
//! Options for building a [`CaptionDecoder`](crate::decoders::CaptionDecoder).

use serde::{Deserialize, Serialize};

/// The default decoding horizon, including the start word.
pub const DEFAULT_MAX_LENGTH: usize = 32;

/// The default start sentinel.
pub const DEFAULT_START_TOKEN: &str = "start";

/// The default end sentinel.
pub const DEFAULT_END_TOKEN: &str = "end";

/// Options for configuring a [`CaptionDecoder`](crate::decoders::CaptionDecoder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// The padded id sequence length, and the bound on the token sequence length.
    pub max_length: usize,

    /// The sentinel every token sequence begins with.
    pub start_token: String,

    /// The sentinel which ends decoding.
    pub end_token: String,

    /// The id used for left padding.
    pub pad_id: u64,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            start_token: DEFAULT_START_TOKEN.to_string(),
            end_token: DEFAULT_END_TOKEN.to_string(),
            pad_id: 0,
        }
    }
}

impl DecoderOptions {
    /// Gets the configured `max_length`.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Sets the configured `max_length`.
    pub fn set_max_length(
        &mut self,
        max_length: usize,
    ) {
        self.max_length = max_length;
    }

    /// Sets the configured `max_length`.
    pub fn with_max_length(
        mut self,
        max_length: usize,
    ) -> Self {
        self.set_max_length(max_length);
        self
    }

    /// Sets the start sentinel.
    pub fn with_start_token<S: Into<String>>(
        mut self,
        start_token: S,
    ) -> Self {
        self.start_token = start_token.into();
        self
    }

    /// Sets the end sentinel.
    pub fn with_end_token<S: Into<String>>(
        mut self,
        end_token: S,
    ) -> Self {
        self.end_token = end_token.into();
        self
    }

    /// Sets the padding id.
    pub fn with_pad_id(
        mut self,
        pad_id: u64,
    ) -> Self {
        self.pad_id = pad_id;
        self
    }
}
