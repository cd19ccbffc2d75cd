//! Image decoder trait
//!
//! Defines the interface to the platform's native image decoding.

use crate::domain::entities::{Dimensions, Payload};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when decoding an image
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Image data is corrupt: {0}")]
    Corrupt(String),

    #[error("Unsupported image format: {0}")]
    Unsupported(String),

    #[error("Image could not be fetched: {0}")]
    Unreachable(String),

    #[error("Image reports an empty dimension ({width}x{height})")]
    EmptyDimension { width: u32, height: u32 },
}

/// Native decoder for obtaining pixel dimensions
///
/// Implementations decode only as much as they need for width and height.
/// Embedded bytes and remote URIs must behave the same way.
#[async_trait]
pub trait ImageDecoder: Send + Sync {
    /// Decodes the payload far enough to measure it
    async fn dimensions(&self, payload: &Payload) -> Result<Dimensions, DecodeError>;
}
