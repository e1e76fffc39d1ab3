//! # Error Types

/// Errors from captioneer operations.
///
/// Every variant classifies to a response status; see [`status_code`](Self::status_code).
#[derive(Debug, thiserror::Error)]
pub enum CaptioneerError {
    /// The request used a method other than `POST`.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The request content type is missing, or is not JSON.
    #[error("Content-Type must be application/json")]
    UnsupportedContentType,

    /// The request body exceeds the configured size limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    BodyUnreadable(String),

    /// The request carries no usable `image` field.
    #[error("No image provided")]
    MissingImage,

    /// The image payload could not be decoded.
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    /// The feature extractor failed.
    #[error("feature extraction failed: {0}")]
    FeatureExtraction(String),

    /// A model artifact could not be made available locally.
    #[error("artifact provisioning failed: {0}")]
    Provisioning(String),

    /// A model artifact is present, but could not be loaded.
    #[error("session initialization failed: {0}")]
    SessionInit(String),

    /// The scoring backend failed while scoring a step.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Parse error (json, base64, integer, etc.)
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CaptioneerError {
    /// The HTTP-style status code this error maps to.
    pub fn status_code(&self) -> u16 {
        use CaptioneerError::*;
        match self {
            MethodNotAllowed => 405,
            PayloadTooLarge => 413,
            UnsupportedContentType | BodyUnreadable(_) | MissingImage | ImageDecode(_) => 400,
            FeatureExtraction(_)
            | Provisioning(_)
            | SessionInit(_)
            | Inference(_)
            | VocabConflict(_)
            | Parse(_)
            | Io(_) => 500,
        }
    }

    /// Is this error caused by the client request?
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// The message exposed to clients.
    ///
    /// Stable per variant; carries no internal detail.
    pub fn public_message(&self) -> &'static str {
        use CaptioneerError::*;
        match self {
            MethodNotAllowed => "Method Not Allowed",
            UnsupportedContentType => "Content-Type must be application/json",
            PayloadTooLarge => "Request body too large",
            BodyUnreadable(_) => "Failed to read request body",
            MissingImage => "No image provided",
            ImageDecode(_) => "Failed to decode base64 image",
            FeatureExtraction(_) => "Feature extraction failed",
            Provisioning(_) | SessionInit(_) => "Caption model unavailable",
            Inference(_) | VocabConflict(_) | Parse(_) | Io(_) => "Caption generation failed",
        }
    }
}

impl From<serde_json::Error> for CaptioneerError {
    fn from(err: serde_json::Error) -> Self {
        CaptioneerError::Parse(err.to_string())
    }
}

/// Result type for captioneer operations.
pub type CResult<T> = core::result::Result<T, CaptioneerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CaptioneerError::MethodNotAllowed.status_code(), 405);
        assert_eq!(CaptioneerError::UnsupportedContentType.status_code(), 400);
        assert_eq!(CaptioneerError::MissingImage.status_code(), 400);
        assert_eq!(CaptioneerError::PayloadTooLarge.status_code(), 413);
        assert_eq!(CaptioneerError::BodyUnreadable("x".into()).status_code(), 400);
        assert_eq!(CaptioneerError::ImageDecode("x".into()).status_code(), 400);
        assert_eq!(
            CaptioneerError::FeatureExtraction("x".into()).status_code(),
            500
        );
        assert_eq!(CaptioneerError::Provisioning("x".into()).status_code(), 500);
        assert_eq!(CaptioneerError::SessionInit("x".into()).status_code(), 500);
        assert_eq!(CaptioneerError::Inference("x".into()).status_code(), 500);

        assert!(CaptioneerError::MissingImage.is_client_error());
        assert!(!CaptioneerError::Inference("x".into()).is_client_error());
    }

    #[test]
    fn test_public_messages_hide_detail() {
        let err = CaptioneerError::SessionInit("/tmp/secret/model.onnx: bad magic".into());
        assert!(!err.public_message().contains("secret"));
        assert!(err.to_string().contains("bad magic"));

        assert_eq!(
            CaptioneerError::ImageDecode("Invalid byte 33".into()).public_message(),
            "Failed to decode base64 image"
        );
    }
}
