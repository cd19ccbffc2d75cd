//! Format sniffer service
//!
//! Decides whether an image is PNG or JPEG. Content bytes always beat
//! declared metadata: extensions and browser/OS MIME types are user
//! controlled and frequently wrong.
//!
//! Unrecognized content defaults to JPEG rather than being rejected.

use crate::domain::entities::{FileSource, MimeType};
use crate::domain::repositories::ContentTypeProbe;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors raised while classifying a local file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SniffError {
    #[error("{name} is not an image (declared type {declared})")]
    NotAnImage { name: String, declared: String },
}

/// Classifies raw bytes by their leading signature
///
/// ```
/// use inlay::domain::entities::MimeType;
/// use inlay::domain::services::sniff_bytes;
///
/// assert_eq!(sniff_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]), Some(MimeType::Png));
/// assert_eq!(sniff_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(MimeType::Jpeg));
/// assert_eq!(sniff_bytes(b"GIF89a"), None);
/// ```
pub fn sniff_bytes(data: &[u8]) -> Option<MimeType> {
    [MimeType::Png, MimeType::Jpeg]
        .into_iter()
        .find(|mime| mime.matches_signature(data))
}

/// Classifies a local file
///
/// Signature first, then the declared type, then JPEG. A declared type
/// outside `image/*` with no matching signature is rejected.
pub fn sniff_file(file: &FileSource) -> Result<MimeType, SniffError> {
    if let Some(mime) = sniff_bytes(file.bytes()) {
        return Ok(mime);
    }

    match file.declared_type() {
        Some(declared) => {
            if let Some(mime) = MimeType::from_declared(declared) {
                return Ok(mime);
            }
            if !is_image_type(declared) {
                return Err(SniffError::NotAnImage {
                    name: file.name().to_string(),
                    declared: declared.to_string(),
                });
            }
            tracing::debug!(
                file = file.name(),
                declared,
                "unrecognized image type, defaulting to JPEG"
            );
            Ok(MimeType::Jpeg)
        }
        None => Ok(MimeType::Jpeg),
    }
}

/// Reads the MIME token of a `data:` URI (`data:image/png;base64,...`)
///
/// Anything that is not PNG, including a missing token, maps to JPEG.
pub fn sniff_data_uri(uri: &str) -> MimeType {
    data_uri_media_type(uri)
        .and_then(MimeType::from_declared)
        .unwrap_or(MimeType::Jpeg)
}

/// Infers the type from the path extension, ignoring query and fragment
pub fn sniff_extension(url: &Url) -> MimeType {
    let file_name = url.path().rsplit('/').next().unwrap_or_default();
    let is_png = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(MimeType::Png.extension()));

    if is_png { MimeType::Png } else { MimeType::Jpeg }
}

/// Returns the media type between `data:` and the first `;` or `,`
fn data_uri_media_type(uri: &str) -> Option<&str> {
    let prefix = uri.get(..5)?;
    if !prefix.eq_ignore_ascii_case("data:") {
        return None;
    }
    let rest = &uri[5..];
    let end = rest.find([';', ',']).unwrap_or(rest.len());
    let media_type = rest[..end].trim();
    (!media_type.is_empty()).then_some(media_type)
}

fn is_image_type(declared: &str) -> bool {
    declared
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Sniffer for remote sources
///
/// Wraps a [`ContentTypeProbe`] and degrades to extension inference when the
/// probe fails. Probe failures never reach the caller.
pub struct FormatSniffer<P: ContentTypeProbe> {
    probe: P,
    probe_timeout: Option<Duration>,
}

impl<P: ContentTypeProbe> FormatSniffer<P> {
    /// Creates a sniffer without a probe timeout
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            probe_timeout: None,
        }
    }

    /// Bounds the metadata probe. Expiry counts as a probe failure.
    pub fn with_probe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Classifies a validated remote URI
    pub async fn sniff_remote(&self, url: &Url) -> MimeType {
        if url.scheme() == "data" {
            return sniff_data_uri(url.as_str());
        }

        match self.declared_remote_type(url).await {
            Some(mime) => mime,
            None => sniff_extension(url),
        }
    }

    async fn declared_remote_type(&self, url: &Url) -> Option<MimeType> {
        let probed = match self.probe_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.probe.content_type(url)).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::debug!(%url, ?limit, "content type probe timed out");
                    return None;
                }
            },
            None => self.probe.content_type(url).await,
        };

        match probed {
            Ok(Some(content_type)) => {
                let mime = MimeType::from_declared(&content_type);
                if mime.is_none() {
                    tracing::debug!(%url, content_type = %content_type, "server type not PNG/JPEG, using extension");
                }
                mime
            }
            Ok(None) => {
                tracing::debug!(%url, "no content type header, using extension");
                None
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "content type probe failed, using extension");
                None
            }
        }
    }
}
