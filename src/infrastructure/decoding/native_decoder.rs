//! Native image decoder
//!
//! Measures images with the `image` crate. Only the header is parsed;
//! pixel data is never decoded.

use crate::domain::entities::{Dimensions, Payload};
use crate::domain::repositories::{DecodeError, ImageDecoder};
use async_trait::async_trait;
use image::{ImageError, ImageReader};
use std::io::Cursor;
use std::time::Duration;
use url::Url;

/// Decoder backed by `image`, fetching remote payloads with `reqwest`
#[derive(Debug, Clone)]
pub struct NativeImageDecoder {
    client: reqwest::Client,
    request_timeout: Duration,
    max_remote_bytes: usize,
}

impl NativeImageDecoder {
    pub fn new(client: reqwest::Client, request_timeout: Duration, max_remote_bytes: usize) -> Self {
        Self {
            client,
            request_timeout,
            max_remote_bytes,
        }
    }

    /// Streams a remote image until its header decodes
    ///
    /// At most `max_remote_bytes` are buffered. A header that does not
    /// decode within that prefix is rejected; the rest of the body is never
    /// read.
    async fn fetch_dimensions(&self, url: &Url) -> Result<Dimensions, DecodeError> {
        let mut response = self
            .client
            .get(url.clone())
            .timeout(self.request_timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DecodeError::Unreachable(e.to_string()))?;

        let mut buffer = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DecodeError::Unreachable(e.to_string()))?
        {
            let room = self.max_remote_bytes - buffer.len();
            let truncated = chunk.len() > room;
            buffer.extend_from_slice(&chunk[..chunk.len().min(room)]);

            match decode_dimensions(&buffer) {
                Ok(dimensions) => {
                    tracing::trace!(%url, read = buffer.len(), "remote image header decoded");
                    return Ok(dimensions);
                }
                Err(err @ DecodeError::EmptyDimension { .. }) => return Err(err),
                Err(_) if !truncated => {}
                Err(_) => {
                    return Err(DecodeError::Unsupported(format!(
                        "no image header within the first {} bytes",
                        self.max_remote_bytes
                    )));
                }
            }
        }

        decode_dimensions(&buffer)
    }
}

#[async_trait]
impl ImageDecoder for NativeImageDecoder {
    async fn dimensions(&self, payload: &Payload) -> Result<Dimensions, DecodeError> {
        match payload {
            Payload::Embedded { bytes, .. } => decode_dimensions(bytes),
            Payload::Remote(url) => self.fetch_dimensions(url).await,
        }
    }
}

/// Reads width and height from an encoded image
///
/// The format is guessed from the content, not from any declared type.
pub fn decode_dimensions(data: &[u8]) -> Result<Dimensions, DecodeError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupt(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::Unsupported(
            "content does not match a known image format".to_string(),
        ));
    }

    let (width, height) = reader.into_dimensions().map_err(map_image_error)?;
    Dimensions::new(width, height).ok_or(DecodeError::EmptyDimension { width, height })
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(e) => DecodeError::Unsupported(e.to_string()),
        other => DecodeError::Corrupt(other.to_string()),
    }
}
