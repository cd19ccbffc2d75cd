//! CLI commands using clap

use crate::application::dto::SubmissionInput;
use crate::config::{ENV_INSERT_URL, ENV_UPLOAD_URL};
use crate::domain::repositories::AltText;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

/// Inlay - Image Upload Pipeline
///
/// Validates an image (format, dimensions), uploads it to the asset service
/// and inserts it into a document.
#[derive(Parser, Debug)]
#[command(name = "inlay")]
#[command(version, about = "Validate images and insert them into documents", long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an image and print what would be uploaded
    Inspect {
        #[command(flatten)]
        input: ImageInput,
    },

    /// Validate, upload and insert an image
    Upload(UploadArgs),
}

/// Exactly one image source
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ImageInput {
    /// Remote image (http, https or data URI)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Local image file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl ImageInput {
    pub fn into_submission_input(self) -> SubmissionInput {
        match (self.url, self.file) {
            (Some(url), _) => SubmissionInput::Url(url),
            (None, Some(path)) => SubmissionInput::File(path),
            // clap enforces the group; treat a missing source as empty input
            (None, None) => SubmissionInput::Url(String::new()),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    #[command(flatten)]
    pub input: ImageInput,

    /// Alternative text describing the image
    #[arg(long, conflicts_with = "decorative")]
    pub alt: Option<String>,

    /// Mark the image as decorative (no alt text)
    #[arg(long)]
    pub decorative: bool,

    /// Disclose that the image was machine-generated
    #[arg(long)]
    pub ai_generated: bool,

    /// Upload service endpoint
    #[arg(long, env = ENV_UPLOAD_URL)]
    pub upload_url: Option<Url>,

    /// Insertion service endpoint
    #[arg(long, env = ENV_INSERT_URL)]
    pub insert_url: Option<Url>,
}

impl UploadArgs {
    pub fn alt_text(&self) -> AltText {
        if self.decorative {
            AltText::decorative()
        } else {
            AltText::new(self.alt.clone().unwrap_or_default())
        }
    }
}
