//! Domain entities
//!
//! Core objects that flow through the image pipeline.

mod descriptor;
mod image_source;
mod mime_type;

pub use descriptor::{DescriptorSummary, Dimensions, ImageDescriptor, Payload};
pub use image_source::{FileSource, ImageSource, UrlSource};
pub use mime_type::MimeType;
