//! Domain layer unit tests
//!
//! Tests for entities and the format sniffer rules.

use async_trait::async_trait;
use inlay::domain::entities::{
    Dimensions, FileSource, ImageDescriptor, ImageSource, MimeType, Payload, UrlSource,
};
use inlay::domain::repositories::{ContentTypeProbe, ProbeError};
use inlay::domain::services::{
    FormatSniffer, SniffError, sniff_bytes, sniff_data_uri, sniff_extension, sniff_file,
};
use proptest::prelude::*;
use rstest::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_HEADER: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

// ============================================================================
// MimeType Tests
// ============================================================================

#[rstest]
#[case("image/png", Some(MimeType::Png))]
#[case("IMAGE/PNG", Some(MimeType::Png))]
#[case("image/png; charset=binary", Some(MimeType::Png))]
#[case("image/jpeg", Some(MimeType::Jpeg))]
#[case("image/jpg", Some(MimeType::Jpeg))]
#[case("image/gif", None)]
#[case("text/html", None)]
#[case("", None)]
fn test_mime_from_declared(#[case] declared: &str, #[case] expected: Option<MimeType>) {
    assert_eq!(MimeType::from_declared(declared), expected);
}

#[test]
fn test_mime_serializes_as_media_type() {
    assert_eq!(serde_json::to_string(&MimeType::Png).unwrap(), "\"image/png\"");
    assert_eq!(MimeType::Jpeg.to_string(), "image/jpeg");
}

// ============================================================================
// Local file sniffing
// ============================================================================

#[rstest]
#[case(Some("image/jpeg"))]
#[case(Some("text/plain"))]
#[case(Some("application/octet-stream"))]
#[case(None)]
fn test_png_signature_beats_declared_type(#[case] declared: Option<&str>) {
    let file = FileSource::new(PNG_HEADER.to_vec(), "photo.jpg", declared.map(String::from));
    assert_eq!(sniff_file(&file), Ok(MimeType::Png));
}

#[rstest]
#[case(Some("image/png"))]
#[case(Some("text/plain"))]
#[case(None)]
fn test_jpeg_signature_beats_declared_type(#[case] declared: Option<&str>) {
    let file = FileSource::new(JPEG_HEADER.to_vec(), "photo.png", declared.map(String::from));
    assert_eq!(sniff_file(&file), Ok(MimeType::Jpeg));
}

#[rstest]
#[case(Some("image/png"), MimeType::Png)]
#[case(Some("image/jpeg"), MimeType::Jpeg)]
#[case(Some("image/webp"), MimeType::Jpeg)]
#[case(None, MimeType::Jpeg)]
fn test_declared_type_used_without_signature(
    #[case] declared: Option<&str>,
    #[case] expected: MimeType,
) {
    let file = FileSource::new(b"RIFF....WEBP".to_vec(), "image", declared.map(String::from));
    assert_eq!(sniff_file(&file), Ok(expected));
}

#[test]
fn test_non_image_declared_type_rejected() {
    let file = FileSource::new(b"hello".to_vec(), "notes.txt", Some("text/plain".into()));
    assert_eq!(
        sniff_file(&file),
        Err(SniffError::NotAnImage {
            name: "notes.txt".into(),
            declared: "text/plain".into(),
        })
    );
}

proptest! {
    #[test]
    fn prop_png_prefix_always_png(tail in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47];
        data.extend(tail);
        prop_assert_eq!(sniff_bytes(&data), Some(MimeType::Png));
    }

    #[test]
    fn prop_jpeg_prefix_always_jpeg(tail in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut data = vec![0xFF, 0xD8, 0xFF];
        data.extend(tail);
        prop_assert_eq!(sniff_bytes(&data), Some(MimeType::Jpeg));
    }

    #[test]
    fn prop_sniff_file_never_fails_without_declared_type(
        data in proptest::collection::vec(any::<u8>(), 1..64)
    ) {
        let file = FileSource::new(data, "blob", None);
        prop_assert!(sniff_file(&file).is_ok());
    }
}

// ============================================================================
// Remote sniffing
// ============================================================================

#[rstest]
#[case("data:image/png;base64,AAAA", MimeType::Png)]
#[case("data:image/jpeg;base64,AAAA", MimeType::Jpeg)]
#[case("data:image/jpg;base64,AAAA", MimeType::Jpeg)]
#[case("data:image/gif;base64,AAAA", MimeType::Jpeg)]
#[case("data:;base64,AAAA", MimeType::Jpeg)]
fn test_sniff_data_uri(#[case] uri: &str, #[case] expected: MimeType) {
    assert_eq!(sniff_data_uri(uri), expected);
}

#[rstest]
#[case("https://cdn.example.com/a.png", MimeType::Png)]
#[case("https://cdn.example.com/a.PNG", MimeType::Png)]
#[case("https://cdn.example.com/a.png?x=1", MimeType::Png)]
#[case("https://cdn.example.com/a.png#top", MimeType::Png)]
#[case("https://cdn.example.com/a.jpg", MimeType::Jpeg)]
#[case("https://cdn.example.com/png/image", MimeType::Jpeg)]
#[case("https://cdn.example.com/a.png.gz", MimeType::Jpeg)]
fn test_sniff_extension(#[case] url: &str, #[case] expected: MimeType) {
    assert_eq!(sniff_extension(&Url::parse(url).unwrap()), expected);
}

/// Probe returning a fixed answer and counting calls
struct StubProbe {
    answer: Result<Option<String>, ProbeError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubProbe {
    fn answering(answer: Result<Option<&str>, ProbeError>) -> Self {
        Self {
            answer: answer.map(|a| a.map(String::from)),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ContentTypeProbe for StubProbe {
    async fn content_type(&self, _url: &Url) -> Result<Option<String>, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer.clone()
    }
}

#[rstest]
#[case(Ok(Some("image/png")), "https://x.test/photo.jpg", MimeType::Png)]
#[case(Ok(Some("image/jpeg; charset=binary")), "https://x.test/photo.png", MimeType::Jpeg)]
#[case(Ok(None), "https://x.test/photo.png?x=1", MimeType::Png)]
#[case(Ok(Some("text/html")), "https://x.test/photo.png", MimeType::Png)]
#[case(Err(ProbeError::Status(404)), "https://x.test/photo.png", MimeType::Png)]
#[case(Err(ProbeError::Network("refused".into())), "https://x.test/photo", MimeType::Jpeg)]
#[tokio::test]
async fn test_sniff_remote(
    #[case] answer: Result<Option<&str>, ProbeError>,
    #[case] url: &str,
    #[case] expected: MimeType,
) {
    let sniffer = FormatSniffer::new(StubProbe::answering(answer));
    assert_eq!(sniffer.sniff_remote(&Url::parse(url).unwrap()).await, expected);
}

#[tokio::test]
async fn test_sniff_remote_data_uri_skips_probe() {
    let probe = StubProbe::answering(Ok(Some("image/jpeg")));
    let sniffer = FormatSniffer::new(probe);
    let url = Url::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();

    assert_eq!(sniffer.sniff_remote(&url).await, MimeType::Png);
}

#[tokio::test(start_paused = true)]
async fn test_probe_timeout_falls_back_to_extension() {
    let mut probe = StubProbe::answering(Ok(Some("image/jpeg")));
    probe.delay = Some(Duration::from_secs(60));
    let sniffer = FormatSniffer::new(probe).with_probe_timeout(Some(Duration::from_secs(1)));

    let url = Url::parse("https://slow.test/a.png").unwrap();
    assert_eq!(sniffer.sniff_remote(&url).await, MimeType::Png);
}

// ============================================================================
// ImageSource Tests
// ============================================================================

#[test]
fn test_source_describe_truncates() {
    let long = format!("data:image/png;base64,{}", "A".repeat(500));
    let source: ImageSource = UrlSource::new(long).into();
    assert_eq!(source.describe().chars().count(), 64);

    let source: ImageSource = FileSource::new(vec![1], "cat.png", None).into();
    assert_eq!(source.describe(), "cat.png");
}

#[test]
fn test_blank_declared_type_is_dropped() {
    let file = FileSource::new(vec![1, 2], "blob", Some("  ".into()));
    assert_eq!(file.declared_type(), None);
    assert_eq!(file.len(), 2);
}

// ============================================================================
// Descriptor Tests
// ============================================================================

#[rstest]
#[case(0, 3)]
#[case(2, 0)]
#[case(0, 0)]
fn test_zero_dimensions_rejected(#[case] width: u32, #[case] height: u32) {
    assert!(Dimensions::new(width, height).is_none());
}

#[fixture]
fn remote_descriptor() -> ImageDescriptor {
    ImageDescriptor::new(
        Payload::Remote(Url::parse("https://cdn.example.com/a.png").unwrap()),
        MimeType::Png,
        Dimensions::new(640, 480).unwrap(),
    )
}

#[rstest]
fn test_descriptor_accessors(remote_descriptor: ImageDescriptor) {
    assert_eq!(remote_descriptor.width(), 640);
    assert_eq!(remote_descriptor.height(), 480);
    assert_eq!(remote_descriptor.dimensions().to_string(), "640x480");
    assert_eq!(
        remote_descriptor.payload().reference(),
        "https://cdn.example.com/a.png"
    );
}

#[rstest]
fn test_descriptor_summary(remote_descriptor: ImageDescriptor) {
    let json = serde_json::to_value(remote_descriptor.summary()).unwrap();
    assert_eq!(json["mime_type"], "image/png");
    assert_eq!(json["width"], 640);
    assert_eq!(json["source"], "https://cdn.example.com/a.png");
}
