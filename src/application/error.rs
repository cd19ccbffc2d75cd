//! Pipeline error taxonomy
//!
//! Every failure leaving the orchestrator is one of these. Each variant maps
//! onto a coarse [`ErrorKind`] the presentation layer can branch on, and
//! renders as the message shown to the user.

use crate::domain::repositories::{CollaboratorError, DecodeError};
use crate::domain::services::SniffError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Machine-distinguishable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Nothing was supplied
    InputEmpty,
    /// Malformed URI, unreadable or non-image file
    InputInvalid,
    /// The image could not be measured
    DecodeFailed,
    /// The upload service rejected the image or could not be reached
    UploadFailed,
    /// The document rejected the insertion
    InsertionFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InputEmpty => "input empty",
            ErrorKind::InputInvalid => "input invalid",
            ErrorKind::DecodeFailed => "decode failed",
            ErrorKind::UploadFailed => "upload failed",
            ErrorKind::InsertionFailed => "insertion failed",
        };
        f.write_str(name)
    }
}

/// Errors that can end an upload attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("No image was supplied")]
    InputEmpty,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("File could not be read: {0}")]
    UnreadableFile(String),

    #[error("Not an image: {0}")]
    NotAnImage(String),

    #[error("Image is too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Cannot decode image: {0}")]
    DecodeFailed(#[from] DecodeError),

    /// Upload service message, verbatim
    #[error("{0}")]
    UploadFailed(String),

    /// Insertion service message, verbatim
    #[error("{0}")]
    InsertionFailed(String),
}

impl PipelineError {
    /// Returns the coarse category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InputEmpty => ErrorKind::InputEmpty,
            PipelineError::InvalidUrl(_)
            | PipelineError::UnreadableFile(_)
            | PipelineError::NotAnImage(_)
            | PipelineError::PayloadTooLarge { .. } => ErrorKind::InputInvalid,
            PipelineError::DecodeFailed(_) => ErrorKind::DecodeFailed,
            PipelineError::UploadFailed(_) => ErrorKind::UploadFailed,
            PipelineError::InsertionFailed(_) => ErrorKind::InsertionFailed,
        }
    }

    pub(crate) fn upload(err: CollaboratorError) -> Self {
        PipelineError::UploadFailed(err.to_string())
    }

    pub(crate) fn insertion(err: CollaboratorError) -> Self {
        PipelineError::InsertionFailed(err.to_string())
    }
}

impl From<SniffError> for PipelineError {
    fn from(value: SniffError) -> Self {
        PipelineError::NotAnImage(value.to_string())
    }
}
