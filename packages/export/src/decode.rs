//! Image decoding for export.
//!
//! Decoding sits behind [`ImageDecoder`] so the exporter can await every image
//! as a future and only lay out the document once all of them have settled.

use image::DynamicImage;
use store::ImagePayload;

use crate::error::ExportError;

/// Async decoder from an inline payload to pixels.
pub trait ImageDecoder {
    fn decode(
        &self,
        payload: &ImagePayload,
    ) -> impl std::future::Future<Output = Result<DynamicImage, ExportError>>;
}

/// Decodes `data:` URLs with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PayloadDecoder;

impl ImageDecoder for PayloadDecoder {
    async fn decode(&self, payload: &ImagePayload) -> Result<DynamicImage, ExportError> {
        let bytes = payload
            .decode()
            .map_err(|e| ExportError::Decode(e.to_string()))?;
        let image =
            image::load_from_memory(&bytes).map_err(|e| ExportError::Decode(e.to_string()))?;
        if image.width() == 0 || image.height() == 0 {
            return Err(ExportError::Decode("image has no pixels".to_string()));
        }
        Ok(image)
    }
}
