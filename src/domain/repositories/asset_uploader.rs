//! Asset uploader trait
//!
//! Defines the interface to the remote asset-upload service.

use crate::domain::entities::{ImageDescriptor, MimeType};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors reported by a remote collaborator
///
/// The message is shown to the user as-is, so adapters should keep the
/// service's own wording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Payload shape accepted by the upload service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Always `"image"`
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mime_type: MimeType,
    /// Data URI or remote URL
    pub src: String,
    /// Preview reference; the same content as `src`
    pub thumbnail: String,
    pub width: u32,
    pub height: u32,
    /// Provenance disclosure: whether the image was machine-generated
    pub ai_generated: bool,
}

impl UploadRequest {
    /// Builds the request from a descriptor that already passed validation
    pub fn from_descriptor(descriptor: &ImageDescriptor, ai_generated: bool) -> Self {
        let reference = descriptor.payload().reference().to_string();
        Self {
            kind: "image",
            mime_type: descriptor.mime_type(),
            thumbnail: reference.clone(),
            src: reference,
            width: descriptor.width(),
            height: descriptor.height(),
            ai_generated,
        }
    }
}

/// A handle to an uploaded asset
#[async_trait]
pub trait AssetHandle: Send + Sync {
    /// Reference id used when inserting the asset into a document
    fn reference_id(&self) -> &str;

    /// Resolves once the service confirms the asset is durably stored
    async fn wait_until_stored(&self) -> Result<(), CollaboratorError>;
}

/// Trait for the remote upload service
///
/// # Example
///
/// ```ignore
/// let handle = uploader.upload(UploadRequest::from_descriptor(&descriptor, false)).await?;
/// handle.wait_until_stored().await?;
/// println!("Stored as {}", handle.reference_id());
/// ```
#[async_trait]
pub trait AssetUploader: Send + Sync {
    /// Uploads an image and returns a handle to it
    async fn upload(&self, request: UploadRequest)
    -> Result<Box<dyn AssetHandle>, CollaboratorError>;
}
