//! Contract text extraction
//!
//! Turns the raw bytes of an uploaded PDF or DOCX into one flat string:
//!
//! - PDF pages are joined with a single newline, in page order
//! - DOCX paragraphs are joined with a single newline, in document order
//!
//! Documents that parse but yield (almost) no text, such as image-only
//! scans, are rejected with [`ExtractionError::InsufficientText`]. So are
//! documents whose text decodes to garbage (fonts with no usable CMap).

pub mod cmap;
pub mod docx;
pub mod error;
pub mod pdf;
pub mod quality;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use error::{ExtractionError, Result};
pub use shared_types::{DocumentKind, ExtractedText};

use tracing::{debug, warn};

/// Trimmed text shorter than this is treated as "nothing extracted"
pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct TextExtractor {
    min_text_chars: usize,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
        }
    }

    pub fn with_min_text_chars(min_text_chars: usize) -> Self {
        Self { min_text_chars }
    }

    pub fn min_text_chars(&self) -> usize {
        self.min_text_chars
    }

    /// Extract text from a document of a known kind
    pub fn extract(&self, data: &[u8], kind: DocumentKind) -> Result<ExtractedText> {
        if data.is_empty() {
            return Err(ExtractionError::InsufficientText {
                found: 0,
                minimum: self.min_text_chars,
            });
        }

        debug!(%kind, bytes = data.len(), "Extracting text");

        let text = match kind {
            DocumentKind::Pdf => pdf::extract_pages(data)?.join("\n"),
            DocumentKind::Docx => docx::extract_paragraphs(data)?.join("\n"),
        };

        // Unreadable output counts as no text at all
        let check = quality::analyze_text_quality(&text);
        if !check.is_valid {
            warn!(%kind, details = %check.details, "Extracted text is unreadable");
            return Err(ExtractionError::InsufficientText {
                found: 0,
                minimum: self.min_text_chars,
            });
        }

        self.validate_text(text)
    }

    /// Extract text from a document whose kind is only known by name or MIME type
    pub fn extract_declared(
        &self,
        data: &[u8],
        filename: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<ExtractedText> {
        let kind = DocumentKind::detect(filename, content_type).ok_or_else(|| {
            ExtractionError::UnsupportedFormat(
                filename
                    .or(content_type)
                    .unwrap_or("unknown")
                    .to_string(),
            )
        })?;
        self.extract(data, kind)
    }

    /// Accept already-plain text if it clears the minimum length
    pub fn validate_text(&self, text: String) -> Result<ExtractedText> {
        let found = text.trim().chars().count();
        debug!(chars = found, "Extracted text");

        if found < self.min_text_chars {
            return Err(ExtractionError::InsufficientText {
                found,
                minimum: self.min_text_chars,
            });
        }

        Ok(ExtractedText::new(text))
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract with the default minimum text threshold
pub fn extract(data: &[u8], kind: DocumentKind) -> Result<ExtractedText> {
    TextExtractor::new().extract(data, kind)
}
