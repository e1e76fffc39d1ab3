use std::{path::PathBuf, sync::Arc};

use captioneer::{
    artifacts::{ArtifactProvisioner, ArtifactSource},
    features::{FeatureExtractor, FeatureSpec, FixedVectorExtractor},
    service::{CaptionService, ServiceConfig},
    session::SessionCell,
    vocab::{WordVocab, io::load_word_vocab_path},
};

use crate::disk_cache::DiskCacheArgs;

/// Vocabulary argument group.
#[derive(clap::Args, Debug)]
pub struct VocabArgs {
    /// Vocabulary file: a JSON word index, a Keras tokenizer export, or base64 lines.
    #[arg(long, default_value = "tokenizer.json")]
    pub vocab: PathBuf,
}

impl VocabArgs {
    /// The vocabulary path, resolved against the data directory.
    pub fn vocab_path(
        &self,
        disk_cache: &DiskCacheArgs,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(disk_cache.open()?.resolve_data_file(&self.vocab))
    }

    /// Load the vocabulary.
    pub fn load_vocab(
        &self,
        disk_cache: &DiskCacheArgs,
    ) -> Result<WordVocab<u32>, Box<dyn std::error::Error>> {
        let path = self.vocab_path(disk_cache)?;
        log::debug!("loading vocabulary from {}", path.display());
        Ok(load_word_vocab_path(&path)?)
    }
}

/// Captioning pipeline argument group.
#[derive(clap::Args, Debug)]
pub struct PipelineArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    /// Local decoder model file; ignored when `--model-url` is given.
    #[arg(long, default_value = "models/best_model_9.onnx")]
    model: PathBuf,

    /// Remote decoder model url; repeat for mirrors.
    #[arg(long = "model-url")]
    model_urls: Vec<String>,

    /// Cache key for a remote decoder model.
    #[arg(long, default_value = "caption-decoder")]
    model_key: String,

    /// Image encoder model file; without one, every image has all-zero features.
    #[arg(long)]
    encoder: Option<PathBuf>,

    /// JSON service config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured decoder `max_length`.
    #[arg(long)]
    max_length: Option<usize>,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,
}

impl PipelineArgs {
    /// Load the service config, with command-line overrides applied.
    pub fn service_config(&self) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::load_path(path)?,
            None => ServiceConfig::default(),
        };
        if let Some(max_length) = self.max_length {
            config.decoder.set_max_length(max_length);
        }
        Ok(config)
    }

    /// The decoder model source.
    pub fn model_source(&self) -> ArtifactSource {
        if self.model_urls.is_empty() {
            ArtifactSource::Local(self.model.clone())
        } else {
            ArtifactSource::remote(&[&self.model_key], self.model_urls.as_slice())
        }
    }

    /// Build the lazy decoder session.
    pub fn session_cell(&self) -> Result<SessionCell<u32>, Box<dyn std::error::Error>> {
        let provisioner =
            ArtifactProvisioner::with_disk_cache(self.model_source(), self.disk_cache.options())?;

        #[cfg(feature = "onnx")]
        let cell = SessionCell::onnx(provisioner);

        #[cfg(not(feature = "onnx"))]
        let cell = SessionCell::from_provisioner(provisioner, |path| {
            Err(captioneer::CaptioneerError::SessionInit(format!(
                "can not load {}: built without onnx support",
                path.display()
            )))
        });

        Ok(cell)
    }

    /// Build the feature extractor.
    pub fn feature_extractor(
        &self,
        spec: FeatureSpec,
    ) -> Result<Arc<dyn FeatureExtractor>, Box<dyn std::error::Error>> {
        match &self.encoder {
            None => {
                log::warn!(
                    "no image encoder configured; using all-zero features of length {}",
                    spec.feature_dim
                );
                Ok(Arc::new(FixedVectorExtractor::zeros(spec.feature_dim)))
            }

            #[cfg(feature = "onnx")]
            Some(path) => Ok(Arc::new(captioneer::features::OnnxImageEncoder::load(
                path, spec,
            )?)),

            #[cfg(not(feature = "onnx"))]
            Some(path) => Err(format!(
                "can not load image encoder {}: built without onnx support",
                path.display()
            )
            .into()),
        }
    }

    /// Build the caption service.
    pub fn load_service(&self) -> Result<CaptionService<u32>, Box<dyn std::error::Error>> {
        let config = self.service_config()?;
        let vocab = Arc::new(self.vocab.load_vocab(&self.disk_cache)?);
        let session = Arc::new(self.session_cell()?);
        let extractor = self.feature_extractor(config.features)?;

        Ok(CaptionService::from_config(
            vocab, session, extractor, &config,
        )?)
    }
}
