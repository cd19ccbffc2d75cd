//! Image descriptor entity
//!
//! The validated, dimensioned, correctly-typed image that is allowed to reach
//! the upload collaborator.

use super::mime_type::MimeType;
use bytes::Bytes;
use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;
use url::Url;

/// Pixel dimensions measured from decoded content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl Dimensions {
    /// Builds dimensions from raw decoder output. Zero on either axis is
    /// not a measurement and yields `None`.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Where the image content lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Local content, kept as bytes and as a self-contained `data:` URI
    Embedded { bytes: Bytes, data_uri: String },
    /// Content served by a remote host
    Remote(Url),
}

impl Payload {
    /// The reference handed to collaborators: the data URI or the URL
    pub fn reference(&self) -> &str {
        match self {
            Payload::Embedded { data_uri, .. } => data_uri,
            Payload::Remote(url) => url.as_str(),
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Payload::Embedded { .. })
    }
}

/// A fully validated image
///
/// Can only be assembled from a payload, a sniffed type and probed
/// dimensions, so holding one means all three stages succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    payload: Payload,
    mime_type: MimeType,
    dimensions: Dimensions,
}

impl ImageDescriptor {
    /// Creates a new descriptor
    pub fn new(payload: Payload, mime_type: MimeType, dimensions: Dimensions) -> Self {
        Self {
            payload,
            mime_type,
            dimensions,
        }
    }

    /// Returns the payload
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the sniffed MIME type
    pub fn mime_type(&self) -> MimeType {
        self.mime_type
    }

    /// Returns the probed dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Returns the width in pixels
    pub fn width(&self) -> u32 {
        self.dimensions.width.get()
    }

    /// Returns the height in pixels
    pub fn height(&self) -> u32 {
        self.dimensions.height.get()
    }

    /// Serializable view without the payload bytes
    pub fn summary(&self) -> DescriptorSummary {
        let (source, embedded_bytes) = match &self.payload {
            Payload::Embedded { bytes, .. } => ("embedded".to_string(), Some(bytes.len())),
            Payload::Remote(url) => (url.to_string(), None),
        };
        DescriptorSummary {
            mime_type: self.mime_type,
            width: self.width(),
            height: self.height(),
            source,
            embedded_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DescriptorSummary {
    pub mime_type: MimeType,
    pub width: u32,
    pub height: u32,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedded_bytes: Option<usize>,
}
