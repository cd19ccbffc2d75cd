//! Data transfer objects exchanged with the presentation layer

mod pipeline_status;
mod submission;

pub use pipeline_status::{AttemptOutcome, PipelineState, PipelineStatus, UploadResult};
pub use submission::{Submission, SubmissionInput};
