//! # ONNX Image Encoder

use std::{fmt, path::Path};

use image::DynamicImage;
use ndarray::Array4;
use ort::{session::Session, value::Tensor};
use parking_lot::Mutex;

use crate::{
    errors::{CResult, CaptioneerError},
    features::{FeatureExtractor, FeatureSpec, FeatureVector, preprocess_image},
};

/// A [`FeatureExtractor`] backed by an ONNX image encoder.
///
/// The encoder takes one ``[1, size, size, 3]`` float input, laid out per
/// [`preprocess_image`], and its first output is flattened into the features.
pub struct OnnxImageEncoder {
    session: Mutex<Session>,
    input_name: String,
    spec: FeatureSpec,
}

impl fmt::Debug for OnnxImageEncoder {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("OnnxImageEncoder")
            .field("input_name", &self.input_name)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

impl OnnxImageEncoder {
    /// Load an encoder model.
    ///
    /// ## Errors
    /// * [`CaptioneerError::SessionInit`] if the model can not be loaded,
    ///   or has no inputs.
    pub fn load<P: AsRef<Path>>(
        path: P,
        spec: FeatureSpec,
    ) -> CResult<Self> {
        let path = path.as_ref();
        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| {
                CaptioneerError::SessionInit(format!(
                    "failed to load image encoder {}: {e}",
                    path.display()
                ))
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| CaptioneerError::SessionInit("image encoder has no inputs".into()))?;

        log::info!("loaded image encoder {}", path.display());
        Ok(Self {
            session: Mutex::new(session),
            input_name,
            spec,
        })
    }

    /// The encoder contract.
    pub fn spec(&self) -> &FeatureSpec {
        &self.spec
    }
}

fn extraction_error(e: impl fmt::Display) -> CaptioneerError {
    CaptioneerError::FeatureExtraction(e.to_string())
}

impl FeatureExtractor for OnnxImageEncoder {
    fn extract(
        &self,
        image: &DynamicImage,
    ) -> CResult<FeatureVector> {
        let size = self.spec.image_size as usize;
        let pixels = preprocess_image(image, self.spec.image_size);
        let pixels = Array4::<f32>::from_shape_vec((1, size, size, 3), pixels)
            .map_err(extraction_error)?;
        let pixels = Tensor::from_array(pixels).map_err(extraction_error)?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => pixels])
            .map_err(extraction_error)?;
        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(extraction_error)?;

        let features = FeatureVector::new(data.to_vec());
        self.spec.check(&features)?;
        Ok(features)
    }
}
