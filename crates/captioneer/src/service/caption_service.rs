//! # Caption Service

use std::{fmt, sync::Arc};

use image::DynamicImage;

use crate::{
    decoders::{CaptionDecoder, DecoderOptions},
    errors::{CResult, CaptioneerError},
    features::{FeatureExtractor, FeatureSpec},
    service::{CaptionRequest, CaptionResponse, ServiceConfig, decode_data_url},
    session::SessionCell,
    types::TokenType,
    vocab::WordVocab,
};

/// The captioning context shared by all requests.
///
/// Built once, immutable afterwards; cheap to clone.
#[derive(Clone)]
pub struct CaptionService<T: TokenType> {
    decoder: Arc<CaptionDecoder<T>>,
    session: Arc<SessionCell<T>>,
    extractor: Arc<dyn FeatureExtractor>,
    features: FeatureSpec,
}

impl<T: TokenType> fmt::Debug for CaptionService<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("CaptionService")
            .field("decoder", &self.decoder)
            .field("session", &self.session)
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

impl<T: TokenType> CaptionService<T> {
    /// Construct a service with the default [`FeatureSpec`].
    ///
    /// ## Errors
    /// * see [`CaptionDecoder::new`].
    pub fn new(
        vocab: Arc<WordVocab<T>>,
        session: Arc<SessionCell<T>>,
        extractor: Arc<dyn FeatureExtractor>,
        options: DecoderOptions,
    ) -> CResult<Self> {
        Ok(Self {
            decoder: Arc::new(CaptionDecoder::new(vocab, options)?),
            session,
            extractor,
            features: FeatureSpec::default(),
        })
    }

    /// Construct a service from a [`ServiceConfig`].
    pub fn from_config(
        vocab: Arc<WordVocab<T>>,
        session: Arc<SessionCell<T>>,
        extractor: Arc<dyn FeatureExtractor>,
        config: &ServiceConfig,
    ) -> CResult<Self> {
        Ok(Self::new(vocab, session, extractor, config.decoder.clone())?
            .with_feature_spec(config.features))
    }

    /// Sets the feature extractor contract.
    pub fn with_feature_spec(
        mut self,
        features: FeatureSpec,
    ) -> Self {
        self.features = features;
        self
    }

    /// The decoder.
    pub fn decoder(&self) -> &CaptionDecoder<T> {
        &self.decoder
    }

    /// The session cell.
    pub fn session(&self) -> &Arc<SessionCell<T>> {
        &self.session
    }

    /// The feature extractor contract.
    pub fn feature_spec(&self) -> &FeatureSpec {
        &self.features
    }

    /// Handle one request; never fails.
    ///
    /// Every failure is classified into a status code and a public message;
    /// server-side failures are logged with their detail.
    pub fn handle(
        &self,
        request: &CaptionRequest,
    ) -> CaptionResponse {
        match self.try_handle(request) {
            Ok(caption) => CaptionResponse::caption(caption),
            Err(err) => {
                if err.is_client_error() {
                    log::debug!("rejected caption request: {err}");
                } else {
                    log::error!("caption request failed: {err}");
                }
                CaptionResponse::error(&err)
            }
        }
    }

    /// Handle one request, returning the caption.
    pub fn try_handle(
        &self,
        request: &CaptionRequest,
    ) -> CResult<String> {
        let data_url = request.image_field()?;
        let image = decode_data_url(&data_url)?;
        self.caption_image(&image)
    }

    /// Caption a decoded image.
    ///
    /// ## Errors
    /// * [`CaptioneerError::FeatureExtraction`] if the extractor fails, or
    ///   breaks the [`FeatureSpec`].
    /// * Session and scoring errors; see [`SessionCell::get_session`].
    pub fn caption_image(
        &self,
        image: &DynamicImage,
    ) -> CResult<String> {
        let features = self.extractor.extract(image).map_err(|err| match err {
            CaptioneerError::FeatureExtraction(_) => err,
            other => CaptioneerError::FeatureExtraction(other.to_string()),
        })?;
        self.features.check(&features)?;

        let session = self.session.get_session()?;
        self.decoder.generate_caption(session.as_ref(), &features)
    }
}
