//! Core data types and error definitions for the summarization pipeline.

use crate::extraction::ExtractionError;
use crate::summarization::SummarizationClientError;
use axum::body::Bytes;
use thiserror::Error;

/// Maximum number of characters of extracted text handed to the model.
pub const MAX_TEXT_LENGTH: usize = 1024;
/// Upper bound on the generated summary length, in model tokens.
pub const MAX_SUMMARY_LENGTH: usize = 130;
/// Lower bound on the generated summary length, in model tokens.
pub const MIN_SUMMARY_LENGTH: usize = 30;

/// Errors emitted by the summarization pipeline.
///
/// Variants are split between caller mistakes ([`ProcessingError::is_client_error`]) and
/// server-side failures; the HTTP layer maps the former to `400` and the latter to `500`.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Request carried no `file` part.
    #[error("No file uploaded")]
    MissingFile,
    /// The `file` part had no usable filename or its body could not be read.
    #[error("Invalid file")]
    InvalidFile,
    /// Filename suffix is not one of the accepted document types.
    #[error("Unsupported file type. Allowed types: {}", crate::processing::ALLOWED_EXTENSIONS.join(", "))]
    UnsupportedExtension,
    /// The request body exceeded the configured upload ceiling.
    #[error("File too large")]
    PayloadTooLarge,
    /// Extraction succeeded but produced only whitespace.
    #[error("No text could be extracted from the file")]
    EmptyText,
    /// Reading text out of the stored upload failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// The summarization backend failed.
    #[error(transparent)]
    Summarization(#[from] SummarizationClientError),
    /// The upload could not be written to scratch storage.
    #[error("Failed to store upload: {0}")]
    Scratch(#[from] std::io::Error),
    /// A blocking extraction task panicked or was cancelled.
    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ProcessingError {
    /// Whether the failure was caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile
                | Self::InvalidFile
                | Self::UnsupportedExtension
                | Self::PayloadTooLarge
                | Self::EmptyText
        )
    }
}

/// A document received from a client, held in memory for a single request.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Filename as supplied by the client; only its suffix is trusted.
    pub filename: String,
    /// Raw document bytes.
    pub bytes: Bytes,
}

/// Result of summarizing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    /// Summary text produced by the model.
    pub summary: String,
    /// Character count of the (possibly truncated) text passed to the model.
    pub original_length: usize,
    /// Character count of the summary.
    pub summary_length: usize,
}
