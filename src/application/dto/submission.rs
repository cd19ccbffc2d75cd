//! Submission DTO

use crate::domain::entities::FileSource;
use crate::domain::repositories::AltText;
use std::path::PathBuf;

/// What the user put in the form
#[derive(Debug, Clone)]
pub enum SubmissionInput {
    /// Free text from the URL field, not yet validated
    Url(String),
    /// A path chosen in the file picker, not yet read
    File(PathBuf),
    /// A file the host has already read into memory
    Source(FileSource),
}

/// One upload attempt's input
#[derive(Debug, Clone)]
pub struct Submission {
    pub input: SubmissionInput,
    pub alt_text: AltText,
    /// Provenance disclosure forwarded to the upload service
    pub ai_generated: bool,
}

impl Submission {
    /// Creates a submission for URL text
    pub fn url(text: impl Into<String>) -> Self {
        Self::new(SubmissionInput::Url(text.into()))
    }

    /// Creates a submission for a local path
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(SubmissionInput::File(path.into()))
    }

    /// Creates a submission for an in-memory file
    pub fn source(file: FileSource) -> Self {
        Self::new(SubmissionInput::Source(file))
    }

    fn new(input: SubmissionInput) -> Self {
        Self {
            input,
            alt_text: AltText::default(),
            ai_generated: false,
        }
    }

    /// Sets the alternative text
    pub fn with_alt_text(mut self, alt_text: AltText) -> Self {
        self.alt_text = alt_text;
        self
    }

    /// Flags the image as machine-generated
    pub fn ai_generated(mut self, flag: bool) -> Self {
        self.ai_generated = flag;
        self
    }
}
