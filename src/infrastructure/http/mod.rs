//! HTTP adapters
//!
//! Thin JSON-over-HTTP implementations of the collaborator ports and the
//! HEAD-based content type probe. They all share one `reqwest::Client`.

mod asset_uploader;
mod client;
mod content_type_probe;
mod document_inserter;

pub use asset_uploader::{HttpAssetHandle, HttpAssetUploader};
pub use client::build_client;
pub use content_type_probe::ReqwestContentTypeProbe;
pub use document_inserter::HttpDocumentInserter;

use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

/// Extracts the service's own error wording from a failed response
///
/// Prefers `{"error": ...}` or `{"message": ...}`, then the raw body, then
/// the status line.
pub(crate) fn rejection_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
        return parsed.error;
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status.to_string()
    } else {
        text.to_string()
    }
}
