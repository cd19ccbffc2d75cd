//! Content type probe trait
//!
//! Asks a remote host what it thinks an image is, without downloading it.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors that can occur while probing a remote content type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Probe timed out")]
    TimedOut,

    #[error("Server responded with status {0}")]
    Status(u16),
}

/// Lightweight metadata request against a remote image
///
/// Callers treat every error as "unknown" and fall back to the URI
/// extension, so implementations should fail rather than retry.
#[async_trait]
pub trait ContentTypeProbe: Send + Sync {
    /// Returns the server-declared `Content-Type`, or `None` when the
    /// response carries no such header.
    async fn content_type(&self, url: &Url) -> Result<Option<String>, ProbeError>;
}
