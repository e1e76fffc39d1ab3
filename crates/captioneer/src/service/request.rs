//! # Caption Requests and Responses

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CResult, CaptioneerError};

/// The JSON content type.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A framework-independent caption request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionRequest<'a> {
    /// The request method; only `POST` is accepted.
    pub method: &'a str,

    /// The `Content-Type` header, if any.
    pub content_type: Option<&'a str>,

    /// The raw request body.
    pub body: &'a [u8],
}

impl<'a> CaptionRequest<'a> {
    /// A `POST` request with a JSON content type.
    pub fn json(body: &'a [u8]) -> Self {
        Self {
            method: "POST",
            content_type: Some(JSON_CONTENT_TYPE),
            body,
        }
    }

    /// Validate the method and content type, and extract the `image` field.
    ///
    /// Checks run in order; the body is only parsed once the method and
    /// content type are accepted. An unparseable body is treated as an
    /// empty object.
    ///
    /// ## Errors
    /// * [`CaptioneerError::MethodNotAllowed`] for any method but `POST`.
    /// * [`CaptioneerError::UnsupportedContentType`] unless the content type
    ///   contains ``application/json``, ignoring case.
    /// * [`CaptioneerError::MissingImage`] unless `image` is a non-empty string.
    pub fn image_field(&self) -> CResult<String> {
        if self.method != "POST" {
            return Err(CaptioneerError::MethodNotAllowed);
        }

        let is_json = self
            .content_type
            .is_some_and(|ct| ct.to_ascii_lowercase().contains(JSON_CONTENT_TYPE));
        if !is_json {
            return Err(CaptioneerError::UnsupportedContentType);
        }

        let payload: Value = serde_json::from_slice(self.body).unwrap_or(Value::Null);
        match payload.get("image") {
            Some(Value::String(image)) if !image.is_empty() => Ok(image.clone()),
            _ => Err(CaptioneerError::MissingImage),
        }
    }
}

/// A caption response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// Success.
    Caption {
        /// The caption; possibly empty.
        caption: String,
    },

    /// Failure.
    Error {
        /// A stable, human-readable message.
        error: String,
    },
}

/// A caption response: a status code and a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionResponse {
    /// HTTP-style status code.
    pub status: u16,

    /// The response body.
    pub body: ResponseBody,
}

impl CaptionResponse {
    /// A `200` response carrying `caption`.
    pub fn caption<S: Into<String>>(caption: S) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Caption {
                caption: caption.into(),
            },
        }
    }

    /// The response for `err`; carries only the public message.
    pub fn error(err: &CaptioneerError) -> Self {
        Self {
            status: err.status_code(),
            body: ResponseBody::Error {
                error: err.public_message().to_string(),
            },
        }
    }

    /// Is this a success response?
    pub fn is_success(&self) -> bool {
        matches!(self.body, ResponseBody::Caption { .. })
    }

    /// The body, as a JSON value.
    pub fn to_value(&self) -> Value {
        match &self.body {
            ResponseBody::Caption { caption } => serde_json::json!({ "caption": caption }),
            ResponseBody::Error { error } => serde_json::json!({ "error": error }),
        }
    }

    /// The body, as a JSON string.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(
        method: &'a str,
        content_type: Option<&'a str>,
        body: &'a [u8],
    ) -> CaptionRequest<'a> {
        CaptionRequest {
            method,
            content_type,
            body,
        }
    }

    #[test]
    fn test_method() {
        for method in ["GET", "PUT", "DELETE", "post"] {
            let req = request(method, Some("application/json"), br#"{"image": "x"}"#);
            assert!(matches!(
                req.image_field(),
                Err(CaptioneerError::MethodNotAllowed)
            ));
        }
    }

    #[test]
    fn test_content_type() {
        for ct in [None, Some("text/plain"), Some(""), Some("application/xml")] {
            let req = request("POST", ct, br#"{"image": "x"}"#);
            assert!(matches!(
                req.image_field(),
                Err(CaptioneerError::UnsupportedContentType)
            ));
        }

        for ct in ["application/json", "Application/JSON; charset=utf-8"] {
            let req = request("POST", Some(ct), br#"{"image": "x"}"#);
            assert_eq!(req.image_field().unwrap(), "x");
        }
    }

    #[test]
    fn test_missing_image() {
        let bodies: &[&[u8]] = &[
            b"",
            b"not json",
            b"[]",
            b"{}",
            br#"{"image": ""}"#,
            br#"{"image": null}"#,
            br#"{"image": 42}"#,
            br#"{"picture": "data:image/png;base64,AAAA"}"#,
        ];
        for body in bodies {
            assert!(matches!(
                CaptionRequest::json(body).image_field(),
                Err(CaptioneerError::MissingImage)
            ));
        }
    }

    #[test]
    fn test_response_json() {
        let ok = CaptionResponse::caption("a dog runs");
        assert_eq!(ok.status, 200);
        assert!(ok.is_success());
        assert_eq!(ok.to_json(), r#"{"caption":"a dog runs"}"#);

        let err = CaptionResponse::error(&CaptioneerError::MissingImage);
        assert_eq!(err.status, 400);
        assert!(!err.is_success());
        assert_eq!(err.to_json(), r#"{"error":"No image provided"}"#);

        let parsed: ResponseBody = serde_json::from_str(&err.to_json()).unwrap();
        assert_eq!(parsed, err.body);
    }
}
