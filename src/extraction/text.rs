use super::ExtractionError;
use std::path::Path;

/// Read a UTF-8 text file, normalizing line endings to `\n` and trimming surrounding whitespace.
pub fn extract_plain_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes)?;
    Ok(normalize_newlines(&text).trim().to_string())
}

fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
