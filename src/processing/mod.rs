//! Document summarization pipeline: validation, scratch storage, extraction, and model calls.

pub mod scratch;
mod service;
pub mod types;
pub mod validation;

pub use scratch::ScratchFile;
pub use service::{ProcessingApi, ProcessingService};
pub use types::{
    MAX_SUMMARY_LENGTH, MAX_TEXT_LENGTH, MIN_SUMMARY_LENGTH, ProcessingError, SummaryOutcome,
    Upload,
};
pub use validation::{ALLOWED_EXTENSIONS, DocumentKind, is_allowed_extension};
