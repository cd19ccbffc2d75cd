//! Image source entity
//!
//! What the user handed us, before anything has been checked. Both variants
//! are immutable once built; the pipeline only ever reads them.

use bytes::Bytes;

/// A local file that has already been read into memory
#[derive(Debug, Clone)]
pub struct FileSource {
    /// Raw file content
    bytes: Bytes,
    /// File name as reported by the picker or filesystem
    name: String,
    /// MIME type reported by the environment, if any. Not trusted.
    declared_type: Option<String>,
}

impl FileSource {
    /// Creates a new file source
    pub fn new(
        bytes: impl Into<Bytes>,
        name: impl Into<String>,
        declared_type: Option<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            name: name.into(),
            declared_type: declared_type.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Returns the raw bytes
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the declared file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared MIME type, if one was supplied
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Returns the size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the file is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A remote image, as typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSource {
    uri: String,
}

impl UrlSource {
    /// Creates a new URL source. The string is kept verbatim.
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Returns the URI string as supplied
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Either a local file or a remote URI
#[derive(Debug, Clone)]
pub enum ImageSource {
    File(FileSource),
    Url(UrlSource),
}

impl ImageSource {
    /// Short label for logs. Long URIs (data URIs in particular) are cut.
    pub fn describe(&self) -> &str {
        const MAX_LABEL: usize = 64;

        let label = match self {
            ImageSource::File(file) => file.name(),
            ImageSource::Url(url) => url.uri(),
        };
        match label.char_indices().nth(MAX_LABEL) {
            Some((end, _)) => &label[..end],
            None => label,
        }
    }
}

impl From<FileSource> for ImageSource {
    fn from(value: FileSource) -> Self {
        ImageSource::File(value)
    }
}

impl From<UrlSource> for ImageSource {
    fn from(value: UrlSource) -> Self {
        ImageSource::Url(value)
    }
}
