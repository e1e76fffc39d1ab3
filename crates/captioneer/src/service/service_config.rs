//! # Service Configuration

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{decoders::DecoderOptions, errors::CResult, features::FeatureSpec};

/// Configuration for a [`CaptionService`](crate::service::CaptionService).
///
/// Every field has a default; a config file only names what it changes:
///
/// ```json
/// { "decoder": { "max_length": 34 }, "features": { "feature_dim": 4096 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Decoder options.
    pub decoder: DecoderOptions,

    /// The feature extractor contract.
    pub features: FeatureSpec,
}

impl ServiceConfig {
    /// Load a JSON config file.
    pub fn load_path<P: AsRef<Path>>(path: P) -> CResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
