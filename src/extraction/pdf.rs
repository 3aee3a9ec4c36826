use super::ExtractionError;
use lopdf::Document;
use std::path::Path;

/// Extract text from every page of a PDF, joining page contributions with single spaces.
///
/// A page that yields no text, or whose content stream cannot be decoded, contributes an empty
/// string instead of aborting the whole document. Only a document that cannot be loaded at all
/// is reported as an error.
pub fn extract_pdf_text(path: &Path) -> Result<String, ExtractionError> {
    let document = Document::load(path)?;
    let pages = document.get_pages();
    tracing::debug!(pages = pages.len(), "Loaded PDF document");

    let contributions: Vec<String> = pages
        .keys()
        .map(|&page_number| match document.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(error) => {
                tracing::debug!(page_number, %error, "Page produced no extractable text");
                String::new()
            }
        })
        .collect();

    Ok(contributions.join(" ").trim().to_string())
}
