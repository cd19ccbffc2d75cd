//! Application layer
//!
//! Use cases that sequence the domain services and ports into the upload
//! pipeline.

mod content_loader;
pub mod dto;
mod error;
mod image_validator;
mod upload_orchestrator;

pub use content_loader::{ContentLoader, DEFAULT_MAX_PAYLOAD_BYTES, declared_type_for_path};
pub use error::{ErrorKind, PipelineError};
pub use image_validator::ImageValidator;
pub use upload_orchestrator::UploadOrchestrator;
