//! # Data URL Images

use base64::{Engine, prelude::BASE64_STANDARD};
use image::DynamicImage;

use crate::errors::{CResult, CaptioneerError};

/// Decode a ``data:<mime>;base64,<payload>`` url into an RGB image.
///
/// ASCII whitespace in the payload is ignored. The declared mime type is not
/// trusted; the image format is sniffed from the decoded bytes.
///
/// ## Errors
/// * [`CaptioneerError::ImageDecode`] for a bad header, bad base64, or
///   undecodable image bytes.
pub fn decode_data_url(data_url: &str) -> CResult<DynamicImage> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| CaptioneerError::ImageDecode("data url has no ','".to_string()))?;

    let header = header.trim();
    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(CaptioneerError::ImageDecode(format!(
            "unsupported data url header: {header:?}"
        )));
    }

    let payload: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let bytes = BASE64_STANDARD
        .decode(payload)
        .map_err(|e| CaptioneerError::ImageDecode(e.to_string()))?;

    let image =
        image::load_from_memory(&bytes).map_err(|e| CaptioneerError::ImageDecode(e.to_string()))?;

    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}
