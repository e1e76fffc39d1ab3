//! # Image Preprocessing
//!
//! The encoder input contract: RGB, ``size x size``, NHWC, each channel
//! value `v` scaled to ``v / 127.5 - 1.0``.

use image::{DynamicImage, imageops::FilterType};

/// Scale a channel byte into ``[-1.0, 1.0]``.
#[inline]
pub fn scale_channel(v: u8) -> f32 {
    f32::from(v) / 127.5 - 1.0
}

/// Preprocess an image into a flat NHWC buffer of ``size * size * 3`` values.
///
/// ## Arguments
/// * `image` - the decoded image; any color type.
/// * `size` - the output edge, in pixels.
pub fn preprocess_image(
    image: &DynamicImage,
    size: u32,
) -> Vec<f32> {
    image
        .resize_exact(size, size, FilterType::Triangle)
        .to_rgb8()
        .into_raw()
        .into_iter()
        .map(scale_channel)
        .collect()
}
