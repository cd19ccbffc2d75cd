//! Image validation use case
//!
//! Load, sniff and probe: everything that happens before an image may reach
//! the upload service. Used on its own by `inspect` and as the first stage
//! of every upload attempt.

use crate::application::content_loader::ContentLoader;
use crate::application::dto::SubmissionInput;
use crate::application::error::PipelineError;
use crate::domain::entities::{
    Dimensions, FileSource, ImageDescriptor, ImageSource, MimeType, Payload, UrlSource,
};
use crate::domain::repositories::{ContentTypeProbe, ImageDecoder};
use crate::domain::services::{DimensionProber, FormatSniffer, sniff_file};

/// Turns raw input into an [`ImageDescriptor`]
pub struct ImageValidator<P: ContentTypeProbe, D: ImageDecoder> {
    loader: ContentLoader,
    sniffer: FormatSniffer<P>,
    prober: DimensionProber<D>,
}

impl<P: ContentTypeProbe, D: ImageDecoder> ImageValidator<P, D> {
    pub fn new(loader: ContentLoader, sniffer: FormatSniffer<P>, prober: DimensionProber<D>) -> Self {
        Self {
            loader,
            sniffer,
            prober,
        }
    }

    /// Runs all validation stages
    pub async fn validate(&self, input: &SubmissionInput) -> Result<ImageDescriptor, PipelineError> {
        let (payload, mime) = self.load(input).await?;
        let dimensions = self.measure(&payload).await?;
        Ok(ImageDescriptor::new(payload, mime, dimensions))
    }

    /// Loads the input and decides its type
    pub async fn load(&self, input: &SubmissionInput) -> Result<(Payload, MimeType), PipelineError> {
        let source = self.resolve(input).await?;
        tracing::debug!(source = source.describe(), "loading image");
        self.load_source(&source).await
    }

    /// Loads an already-resolved source
    ///
    /// URL text is parsed before the sniffer runs, so a malformed URI never
    /// causes a network request.
    pub async fn load_source(
        &self,
        source: &ImageSource,
    ) -> Result<(Payload, MimeType), PipelineError> {
        match source {
            ImageSource::Url(url) => {
                let url = self.loader.parse_url(url.uri())?;
                let mime = self.sniffer.sniff_remote(&url).await;
                Ok((self.loader.load_url(url)?, mime))
            }
            ImageSource::File(file) => self.embed(file),
        }
    }

    /// Measures a loaded payload
    pub async fn measure(&self, payload: &Payload) -> Result<Dimensions, PipelineError> {
        Ok(self.prober.probe(payload).await?)
    }

    async fn resolve(&self, input: &SubmissionInput) -> Result<ImageSource, PipelineError> {
        let source: ImageSource = match input {
            SubmissionInput::Url(text) => UrlSource::new(text.as_str()).into(),
            SubmissionInput::File(path) => self.loader.read_file(path).await?.into(),
            SubmissionInput::Source(file) => file.clone().into(),
        };
        Ok(source)
    }

    fn embed(&self, file: &FileSource) -> Result<(Payload, MimeType), PipelineError> {
        if file.is_empty() {
            return Err(PipelineError::InputEmpty);
        }
        let mime = sniff_file(file)?;
        let payload = self.loader.load_file(file, mime)?;
        Ok((payload, mime))
    }
}
