//! Text extraction for uploaded documents.
//!
//! Extraction is synchronous and file based: callers run it on the blocking pool against a
//! scratch file. PDF documents are read page by page, plain text is decoded as UTF-8.

mod pdf;
mod text;

use crate::processing::DocumentKind;
use std::path::Path;
use thiserror::Error;

pub use pdf::extract_pdf_text;
#[cfg(test)]
pub(crate) use pdf::fixtures;
pub use text::extract_plain_text;

/// Errors raised while reading text out of a stored upload.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The scratch file could not be read.
    #[error("Error extracting text: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not a loadable PDF document.
    #[error("Error extracting text: {0}")]
    Pdf(#[from] lopdf::Error),
    /// A plain-text upload was not valid UTF-8.
    #[error("Error extracting text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Extract the textual content of `path`, interpreting it according to `kind`.
///
/// The returned text is trimmed and may be empty; deciding whether empty text is acceptable is
/// left to the caller.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String, ExtractionError> {
    tracing::debug!(path = %path.display(), ?kind, "Extracting text");
    let text = match kind {
        DocumentKind::Pdf => extract_pdf_text(path)?,
        DocumentKind::Text => extract_plain_text(path)?,
    };
    tracing::debug!(chars = text.chars().count(), ?kind, "Extracted text");
    Ok(text)
}
