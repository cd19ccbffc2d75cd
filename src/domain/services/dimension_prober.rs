//! Dimension prober service
//!
//! Measures an image through the native decoder. There is no fallback: if
//! the decoder cannot say how big the image is, the image is rejected.

use crate::domain::entities::{Dimensions, Payload};
use crate::domain::repositories::{DecodeError, ImageDecoder};

/// Obtains pixel dimensions for a loaded payload
pub struct DimensionProber<D: ImageDecoder> {
    decoder: D,
}

impl<D: ImageDecoder> DimensionProber<D> {
    /// Creates a prober over the given decoder
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Decodes just enough of `payload` to measure it
    pub async fn probe(&self, payload: &Payload) -> Result<Dimensions, DecodeError> {
        match self.decoder.dimensions(payload).await {
            Ok(dimensions) => {
                tracing::debug!(%dimensions, embedded = payload.is_embedded(), "probed image");
                Ok(dimensions)
            }
            Err(e) => {
                tracing::debug!(error = %e, embedded = payload.is_embedded(), "image could not be decoded");
                Err(e)
            }
        }
    }
}
