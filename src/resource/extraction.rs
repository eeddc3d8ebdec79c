//! Extraction requests
//!
//! A create submission names exactly one source the backend should extract a
//! product from. [`CreatePayload`] is the loose form as it arrives from the
//! user; [`ExtractionRequest`] is the validated choice.

use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use std::path::Path;

use crate::error::{TransportError, UnsupportedExtractionMethod};

/// Multipart field carrying the PDF bytes
pub const PDF_FIELD: &str = "pdf_file";

/// Raw PDF upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a PDF from disk
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        Ok(Self { file_name, bytes })
    }

    /// Multipart form with the file under [`PDF_FIELD`]
    pub fn into_form(self) -> Result<Form, TransportError> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str("application/pdf")
            .map_err(TransportError::Multipart)?;

        Ok(Form::new().part(PDF_FIELD, part))
    }
}

/// Fields of the create form. Any combination may be filled in.
#[derive(Debug, Clone, Default)]
pub struct CreatePayload {
    pub url: Option<String>,
    pub text: Option<String>,
    pub pdf: Option<PdfFile>,
}

impl CreatePayload {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn pdf(pdf: PdfFile) -> Self {
        Self {
            pdf: Some(pdf),
            ..Default::default()
        }
    }
}

/// Source to extract a product from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionRequest {
    Url(String),
    Text(String),
    Pdf(PdfFile),
}

impl ExtractionRequest {
    /// Endpoint path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Self::Url(_) => "products/extract/url",
            Self::Text(_) => "products/extract/text",
            Self::Pdf(_) => "products/extract/pdf",
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Url(_) => "url",
            Self::Text(_) => "text",
            Self::Pdf(_) => "pdf",
        }
    }

    /// Request body the backend expects for this source
    pub fn into_body(self) -> ExtractionBody {
        match self {
            Self::Url(url) => ExtractionBody::Json(json!({ "url": url })),
            Self::Text(text) => ExtractionBody::Json(json!({ "large_text": text })),
            Self::Pdf(pdf) => ExtractionBody::Multipart(pdf),
        }
    }
}

/// Wire form of an extraction request
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionBody {
    /// Sent with a JSON content type
    Json(Value),
    /// Sent as a multipart form under [`PDF_FIELD`]
    Multipart(PdfFile),
}

/// Picks the source in priority order: url, then text, then pdf.
/// Empty strings count as absent.
impl TryFrom<CreatePayload> for ExtractionRequest {
    type Error = UnsupportedExtractionMethod;

    fn try_from(payload: CreatePayload) -> Result<Self, Self::Error> {
        if let Some(url) = payload.url.filter(|u| !u.is_empty()) {
            return Ok(Self::Url(url));
        }
        if let Some(text) = payload.text.filter(|t| !t.is_empty()) {
            return Ok(Self::Text(text));
        }
        if let Some(pdf) = payload.pdf {
            return Ok(Self::Pdf(pdf));
        }
        Err(UnsupportedExtractionMethod)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pdf() -> PdfFile {
        PdfFile::new("spec-sheet.pdf", b"%PDF-1.4 test".to_vec())
    }

    #[test]
    fn test_url_wins_over_everything() {
        let payload = CreatePayload {
            url: Some("http://x.test/p".to_string()),
            text: Some("some text".to_string()),
            pdf: Some(sample_pdf()),
        };
        let request = ExtractionRequest::try_from(payload).unwrap();
        assert_eq!(request, ExtractionRequest::Url("http://x.test/p".to_string()));
        assert_eq!(request.path(), "products/extract/url");
        assert_eq!(
            request.into_body(),
            ExtractionBody::Json(json!({"url": "http://x.test/p"}))
        );
    }

    #[test]
    fn test_empty_url_falls_through_to_text() {
        let payload = CreatePayload {
            url: Some(String::new()),
            text: Some("A blue mug".to_string()),
            pdf: Some(sample_pdf()),
        };
        let request = ExtractionRequest::try_from(payload).unwrap();
        assert_eq!(request.kind(), "text");
        assert_eq!(
            request.into_body(),
            ExtractionBody::Json(json!({"large_text": "A blue mug"}))
        );
    }

    #[test]
    fn test_pdf_when_only_pdf_set() {
        let payload = CreatePayload {
            text: Some(String::new()),
            ..CreatePayload::pdf(sample_pdf())
        };
        let request = ExtractionRequest::try_from(payload).unwrap();
        assert_eq!(request, ExtractionRequest::Pdf(sample_pdf()));
        assert_eq!(request.path(), "products/extract/pdf");
        assert_eq!(request.into_body(), ExtractionBody::Multipart(sample_pdf()));
    }

    #[test]
    fn test_nothing_set_is_rejected() {
        assert_eq!(
            ExtractionRequest::try_from(CreatePayload::default()),
            Err(UnsupportedExtractionMethod)
        );

        let blank = CreatePayload {
            url: Some(String::new()),
            text: Some(String::new()),
            pdf: None,
        };
        assert_eq!(ExtractionRequest::try_from(blank), Err(UnsupportedExtractionMethod));
    }

    #[test]
    fn test_pdf_from_path_reads_name_and_bytes() {
        let path =
            std::env::temp_dir().join(format!("product-admin-{}.pdf", std::process::id()));
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let pdf = tokio_test::block_on(PdfFile::from_path(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(pdf.bytes, b"%PDF-1.7");
        assert!(pdf.file_name.starts_with("product-admin-"));
        assert!(pdf.file_name.ends_with(".pdf"));
    }

    #[test]
    fn test_pdf_from_missing_path_fails() {
        let result = tokio_test::block_on(PdfFile::from_path("/nonexistent/product.pdf"));
        assert!(result.is_err());
    }

    #[test]
    fn test_every_source_has_a_body() {
        for request in [
            ExtractionRequest::Url("http://x.test/p".to_string()),
            ExtractionRequest::Text("Steel bottle".to_string()),
        ] {
            assert!(matches!(request.into_body(), ExtractionBody::Json(Value::Object(_))));
        }
        assert!(matches!(
            ExtractionRequest::Pdf(sample_pdf()).into_body(),
            ExtractionBody::Multipart(_)
        ));
    }

    #[test]
    fn test_pdf_into_form() {
        assert!(sample_pdf().into_form().is_ok());
    }
}
