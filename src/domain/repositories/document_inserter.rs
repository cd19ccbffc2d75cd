//! Document inserter trait
//!
//! Defines the interface to the host document's insertion service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::asset_uploader::CollaboratorError;

/// Alternative text attached to an inserted image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AltText {
    pub text: String,
    /// Marks the image as decorative; screen readers skip it
    pub decorative: bool,
}

impl AltText {
    /// Creates alt text describing the image
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            decorative: false,
        }
    }

    /// Creates alt text for a purely decorative image
    pub fn decorative() -> Self {
        Self {
            text: String::new(),
            decorative: true,
        }
    }
}

/// Payload shape accepted by the insertion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertRequest {
    /// Always `"image"`
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Reference id returned by the upload service
    pub reference: String,
    pub alt_text: AltText,
}

impl InsertRequest {
    pub fn new(reference: impl Into<String>, alt_text: AltText) -> Self {
        Self {
            kind: "image",
            reference: reference.into(),
            alt_text,
        }
    }
}

/// Acknowledgement returned by the insertion service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionReceipt {
    /// Identifier of the inserted element, when the service reports one
    #[serde(default)]
    pub id: Option<String>,
}

/// Trait for the document insertion service
#[async_trait]
pub trait DocumentInserter: Send + Sync {
    /// Inserts an uploaded asset into the document
    async fn insert(&self, request: InsertRequest) -> Result<InsertionReceipt, CollaboratorError>;
}
