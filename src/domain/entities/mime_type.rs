//! MIME type entity
//!
//! The closed set of raster formats the pipeline hands to the upload
//! collaborator. Anything else is coerced into one of these by the sniffer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PNG files start with `89 50 4E 47`; only the first four bytes are checked.
pub const PNG_SIGNATURE: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

/// SOI marker followed by the first marker prefix.
pub const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Supported image types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MimeType {
    /// `image/jpeg`
    #[serde(rename = "image/jpeg")]
    Jpeg,
    /// `image/png`
    #[serde(rename = "image/png")]
    Png,
}

impl MimeType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    #[must_use]
    pub const fn signature(&self) -> &'static [u8] {
        match self {
            Self::Jpeg => &JPEG_SIGNATURE,
            Self::Png => &PNG_SIGNATURE,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        }
    }

    /// Maps a declared MIME string onto the enum.
    ///
    /// Case and parameters are ignored (`image/PNG; q=1` is PNG). `image/jpg`
    /// is accepted as a common misspelling of `image/jpeg`. Returns `None`
    /// for anything else, including other `image/*` types.
    pub fn from_declared(declared: &str) -> Option<Self> {
        let essence = declared.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("image/png") {
            Some(Self::Png)
        } else if essence.eq_ignore_ascii_case("image/jpeg")
            || essence.eq_ignore_ascii_case("image/jpg")
        {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    /// Checks whether `data` starts with this type's magic bytes
    pub fn matches_signature(&self, data: &[u8]) -> bool {
        data.starts_with(self.signature())
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
