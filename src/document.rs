//! Plain-text extraction from uploaded resume documents.
//!
//! Only PDF is accepted. Pages are read in order and their text concatenated
//! with no separator; a page that yields nothing contributes an empty segment.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("unsupported document format '{0}', only PDF is accepted")]
    UnsupportedFormat(String),

    #[error("document is not a readable PDF: {0}")]
    Unreadable(String),

    #[error("extraction task failed: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentFormat {
    Pdf,
}

impl DocumentFormat {
    /// Decides the format from the upload's name and declared content type.
    /// A declared type, when present, must agree with the extension.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Result<Self, ExtractionError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match (extension.as_deref(), content_type) {
            (Some("pdf"), None) => Ok(DocumentFormat::Pdf),
            (Some("pdf"), Some(ct)) if ct.eq_ignore_ascii_case(PDF_CONTENT_TYPE) => {
                Ok(DocumentFormat::Pdf)
            }
            (_, Some(ct)) if !ct.eq_ignore_ascii_case(PDF_CONTENT_TYPE) => {
                Err(ExtractionError::UnsupportedFormat(ct.to_string()))
            }
            _ => Err(ExtractionError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// An uploaded file as handed over by the presentation layer.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn format(&self) -> Result<DocumentFormat, ExtractionError> {
        DocumentFormat::detect(&self.file_name, self.content_type.as_deref())
    }
}

/// Splits a document into per-page text, in page order.
pub trait PageTextSource: Send + Sync + 'static {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// [`PageTextSource`] backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfPages;

impl PageTextSource for LopdfPages {
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(ExtractionError::Unreadable("missing %PDF header".into()));
        }
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

        let pages = doc.get_pages();
        debug!(pages = pages.len(), "parsed PDF");

        let texts = pages
            .keys()
            .map(|&page| {
                doc.extract_text(&[page]).unwrap_or_else(|e| {
                    warn!(page, error = %e, "page has no extractable text");
                    String::new()
                })
            })
            .collect();
        Ok(texts)
    }
}

pub struct DocumentTextExtractor<S = LopdfPages> {
    source: Arc<S>,
}

impl Default for DocumentTextExtractor<LopdfPages> {
    fn default() -> Self {
        Self::new(LopdfPages)
    }
}

impl<S: PageTextSource> DocumentTextExtractor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Checks the format, then parses on the blocking pool so callers stay responsive.
    /// A document with no pages yields an empty string.
    pub async fn extract_text(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
        document.format()?;

        let source = Arc::clone(&self.source);
        let bytes = document.bytes.clone();
        let pages = tokio::task::spawn_blocking(move || source.page_texts(&bytes))
            .await
            .map_err(|e| ExtractionError::Aborted(e.to_string()))??;

        let text = pages.concat();
        debug!(
            file = %document.file_name,
            pages = pages.len(),
            chars = text.len(),
            "extracted document text"
        );
        Ok(text)
    }
}
