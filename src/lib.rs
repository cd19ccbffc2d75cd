pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::dto::{
    AttemptOutcome, PipelineState, PipelineStatus, Submission, SubmissionInput, UploadResult,
};
pub use application::{
    ContentLoader, ErrorKind, ImageValidator, PipelineError, UploadOrchestrator,
};
pub use config::{ConfigError, PipelineConfig};
pub use domain::entities::{
    DescriptorSummary, Dimensions, FileSource, ImageDescriptor, ImageSource, MimeType, Payload,
    UrlSource,
};
