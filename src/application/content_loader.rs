//! Content loader
//!
//! Turns user input into something the prober and uploader can address:
//! local files become a self-contained `data:` URI, URLs become a parsed,
//! absolute [`Url`]. Malformed URLs fail here, before any network or decode
//! work happens.

use crate::application::error::PipelineError;
use crate::domain::entities::{FileSource, MimeType, Payload};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use std::path::Path;
use url::Url;

/// 10 MiB
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "data"];

/// Normalizes files and URLs into payloads
#[derive(Debug, Clone)]
pub struct ContentLoader {
    max_payload_bytes: usize,
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAYLOAD_BYTES)
    }
}

impl ContentLoader {
    pub fn new(max_payload_bytes: usize) -> Self {
        Self { max_payload_bytes }
    }

    pub fn max_payload_bytes(&self) -> usize {
        self.max_payload_bytes
    }

    /// Reads a local file into a [`FileSource`]
    ///
    /// The declared type comes from the file extension, which is all the
    /// environment reports for a plain path.
    pub async fn read_file(&self, path: &Path) -> Result<FileSource, PipelineError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| PipelineError::UnreadableFile(format!("{}: {}", path.display(), e)))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(FileSource::new(
            data,
            name,
            declared_type_for_path(path).map(str::to_string),
        ))
    }

    /// Encodes a sniffed file as an embedded payload
    pub fn load_file(&self, file: &FileSource, mime: MimeType) -> Result<Payload, PipelineError> {
        if file.is_empty() {
            return Err(PipelineError::InputEmpty);
        }
        self.check_size(file.len())?;

        let data_uri = format!("data:{};base64,{}", mime, STANDARD.encode(file.bytes()));
        Ok(Payload::Embedded {
            bytes: file.bytes().clone(),
            data_uri,
        })
    }

    /// Validates URL text typed by the user
    ///
    /// Empty input is [`PipelineError::InputEmpty`]; anything that is not an
    /// absolute `http`, `https` or `data` URI is [`PipelineError::InvalidUrl`].
    pub fn parse_url(&self, input: &str) -> Result<Url, PipelineError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::InputEmpty);
        }

        let url = Url::parse(trimmed)
            .map_err(|e| PipelineError::InvalidUrl(format!("{trimmed}: {e}")))?;

        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(PipelineError::InvalidUrl(format!(
                "{trimmed}: unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if url.scheme() != "data" && url.host().is_none() {
            return Err(PipelineError::InvalidUrl(format!("{trimmed}: missing host")));
        }

        Ok(url)
    }

    /// Turns a validated URL into a payload
    ///
    /// `data:` URIs already carry their content, so they are decoded into an
    /// embedded payload and never touch the network.
    pub fn load_url(&self, url: Url) -> Result<Payload, PipelineError> {
        if url.scheme() != "data" {
            return Ok(Payload::Remote(url));
        }

        let bytes = decode_data_uri(url.as_str())?;
        if bytes.is_empty() {
            return Err(PipelineError::InputEmpty);
        }
        self.check_size(bytes.len())?;

        Ok(Payload::Embedded {
            bytes: Bytes::from(bytes),
            data_uri: url.into(),
        })
    }

    fn check_size(&self, size: usize) -> Result<(), PipelineError> {
        if size > self.max_payload_bytes {
            return Err(PipelineError::PayloadTooLarge {
                size,
                max: self.max_payload_bytes,
            });
        }
        Ok(())
    }
}

/// Only base64 data URIs are accepted; percent-encoded image bytes are not
/// something a picker or browser produces.
fn decode_data_uri(uri: &str) -> Result<Vec<u8>, PipelineError> {
    let (header, data) = uri
        .split_once(',')
        .ok_or_else(|| PipelineError::InvalidUrl("data URI has no payload".to_string()))?;

    let is_base64 = header
        .rsplit(';')
        .next()
        .is_some_and(|param| param.trim().eq_ignore_ascii_case("base64"));
    if !is_base64 {
        return Err(PipelineError::InvalidUrl(
            "data URI must be base64-encoded".to_string(),
        ));
    }

    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| PipelineError::InvalidUrl(format!("data URI is not valid base64: {e}")))
}

/// MIME type a desktop environment would report for a file name
pub fn declared_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "pdf" => "application/pdf",
        "json" => "application/json",
        _ => return None,
    };
    Some(mime)
}
