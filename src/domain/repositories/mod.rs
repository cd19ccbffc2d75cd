//! Repository traits (ports)
//!
//! Contracts for everything outside the pipeline: the network metadata
//! probe, the native image decoder, and the two remote collaborators.

mod asset_uploader;
mod content_type_probe;
mod document_inserter;
mod image_decoder;

pub use asset_uploader::{AssetHandle, AssetUploader, CollaboratorError, UploadRequest};
pub use content_type_probe::{ContentTypeProbe, ProbeError};
pub use document_inserter::{AltText, DocumentInserter, InsertRequest, InsertionReceipt};
pub use image_decoder::{DecodeError, ImageDecoder};
