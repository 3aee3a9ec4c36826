//! Filename-based document type detection.

/// File suffixes accepted by the upload endpoint, in display order.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

/// Document formats the extractor knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Paginated PDF document.
    Pdf,
    /// UTF-8 plain text.
    Text,
}

impl DocumentKind {
    /// Classify a filename by the lowercased suffix after its last `.`.
    ///
    /// ```
    /// use docsum::processing::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_filename("report.PDF"), Some(DocumentKind::Pdf));
    /// assert_eq!(DocumentKind::from_filename("notes.txt"), Some(DocumentKind::Text));
    /// assert_eq!(DocumentKind::from_filename("slides.doc"), None);
    /// assert_eq!(DocumentKind::from_filename("README"), None);
    /// ```
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, suffix) = filename.rsplit_once('.')?;
        match suffix.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    /// Canonical lowercase extension for this kind.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "txt",
        }
    }
}

/// True iff `filename` contains a `.` and its final suffix is an allowed extension.
pub fn is_allowed_extension(filename: &str) -> bool {
    DocumentKind::from_filename(filename).is_some()
}
