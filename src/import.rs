//! Batch import sources
//!
//! An import file lists one source per line. `http(s)://` lines are URLs,
//! lines naming a `.pdf` file are uploads, anything else is sent as text.
//! Blank lines and `#` comments are skipped.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::resource::{ExtractionRequest, PdfFile};

/// A source line before any file is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    Url(String),
    Text(String),
    Pdf(PathBuf),
}

impl ImportSource {
    /// Classify one line; `None` for blanks and comments
    pub fn parse(line: &str, base_dir: &Path) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        if line.starts_with("http://") || line.starts_with("https://") {
            return Some(Self::Url(line.to_string()));
        }

        if line.to_ascii_lowercase().ends_with(".pdf") {
            let path = Path::new(line);
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                base_dir.join(path)
            };
            return Some(Self::Pdf(path));
        }

        Some(Self::Text(line.to_string()))
    }

    /// Turn the source into a request, reading PDFs from disk
    pub async fn into_request(self) -> Result<ExtractionRequest> {
        Ok(match self {
            Self::Url(url) => ExtractionRequest::Url(url),
            Self::Text(text) => ExtractionRequest::Text(text),
            Self::Pdf(path) => {
                let pdf = PdfFile::from_path(&path)
                    .await
                    .with_context(|| format!("Failed to read PDF {:?}", path))?;
                ExtractionRequest::Pdf(pdf)
            }
        })
    }
}

/// Parse every source in an import file's content.
/// Relative PDF paths resolve against `base_dir`.
pub fn parse_sources(content: &str, base_dir: &Path) -> Vec<ImportSource> {
    content
        .lines()
        .filter_map(|line| ImportSource::parse(line, base_dir))
        .collect()
}

/// Read an import file and build all of its requests
pub async fn load_requests(path: &Path) -> Result<Vec<ExtractionRequest>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read import file {:?}", path))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut requests = Vec::new();
    for source in parse_sources(&content, base_dir) {
        requests.push(source.into_request().await?);
    }

    tracing::info!("Loaded {} import sources from {:?}", requests.len(), path);
    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources() {
        let content = "\
# products to import
https://shop.test/beanie

Stainless steel water bottle, 750ml
datasheets/mug.PDF
/abs/catalog.pdf
";
        let sources = parse_sources(content, Path::new("/imports"));
        assert_eq!(
            sources,
            vec![
                ImportSource::Url("https://shop.test/beanie".to_string()),
                ImportSource::Text("Stainless steel water bottle, 750ml".to_string()),
                ImportSource::Pdf(PathBuf::from("/imports/datasheets/mug.PDF")),
                ImportSource::Pdf(PathBuf::from("/abs/catalog.pdf")),
            ]
        );
    }

    #[test]
    fn test_comments_and_blanks_are_skipped() {
        assert!(ImportSource::parse("   ", Path::new(".")).is_none());
        assert!(ImportSource::parse("# http://skipped.test", Path::new(".")).is_none());
    }

    #[test]
    fn test_into_request() {
        let request =
            tokio_test::block_on(ImportSource::Text("a mug".into()).into_request()).unwrap();
        assert_eq!(request, ExtractionRequest::Text("a mug".to_string()));
    }

    #[test]
    fn test_missing_pdf_is_an_error() {
        let source = ImportSource::Pdf(PathBuf::from("/nonexistent/sheet.pdf"));
        let err = tokio_test::block_on(source.into_request()).unwrap_err();
        assert!(err.to_string().contains("Failed to read PDF"));
    }
}
