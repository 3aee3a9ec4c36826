//! Processing service coordinating scratch storage, extraction, and summarization.

use crate::{
    extraction,
    metrics::{MetricsSnapshot, SummaryMetrics},
    processing::{
        scratch::ScratchFile,
        types::{
            MAX_SUMMARY_LENGTH, MAX_TEXT_LENGTH, MIN_SUMMARY_LENGTH, ProcessingError,
            SummaryOutcome, Upload,
        },
        validation::DocumentKind,
    },
    summarization::{SummarizationClient, SummarizationRequest},
};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Runs one upload through the linear summarization pipeline.
///
/// The service owns the shared summarization client and the metrics registry. Construct it once
/// near process start and share it through an `Arc`; it holds no per-request state.
pub struct ProcessingService {
    summarizer: Arc<dyn SummarizationClient>,
    scratch_dir: PathBuf,
    metrics: SummaryMetrics,
}

/// Abstraction over the processing pipeline used by the HTTP surface.
#[async_trait]
pub trait ProcessingApi: Send + Sync {
    /// Validate, extract, truncate, and summarize an uploaded document.
    async fn summarize_upload(&self, upload: Upload) -> Result<SummaryOutcome, ProcessingError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl ProcessingService {
    /// Build a service that stores uploads under `scratch_dir` while they are processed.
    pub fn new(summarizer: Arc<dyn SummarizationClient>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            summarizer,
            scratch_dir: scratch_dir.into(),
            metrics: SummaryMetrics::new(),
        }
    }

    /// Summarize an upload, recording the outcome in the metrics registry.
    pub async fn summarize_upload(&self, upload: Upload) -> Result<SummaryOutcome, ProcessingError> {
        let result = self.run_pipeline(upload).await;
        match &result {
            Ok(outcome) => self.metrics.record_summary(outcome.original_length as u64),
            Err(error) if error.is_client_error() => self.metrics.record_rejection(),
            Err(_) => self.metrics.record_failure(),
        }
        result
    }

    async fn run_pipeline(&self, upload: Upload) -> Result<SummaryOutcome, ProcessingError> {
        let Upload { filename, bytes } = upload;
        if filename.is_empty() {
            return Err(ProcessingError::InvalidFile);
        }
        let kind = DocumentKind::from_filename(&filename)
            .ok_or(ProcessingError::UnsupportedExtension)?;
        tracing::info!(filename = %filename, ?kind, bytes = bytes.len(), "Processing document");

        let scratch_dir = self.scratch_dir.clone();
        let (scratch, extracted) = tokio::task::spawn_blocking(move || {
            let scratch = ScratchFile::persist(&scratch_dir, kind, &bytes)?;
            let extracted = extraction::extract_text(scratch.path(), kind);
            Ok::<_, ProcessingError>((scratch, extracted))
        })
        .await??;

        let text = extracted?;
        if text.trim().is_empty() {
            return Err(ProcessingError::EmptyText);
        }

        let text = truncate_chars(&text, MAX_TEXT_LENGTH);
        let original_length = text.chars().count();
        tracing::debug!(original_length, "Bounded input text");

        let summary = self
            .summarizer
            .generate_summary(SummarizationRequest {
                text: text.to_string(),
                min_length: MIN_SUMMARY_LENGTH,
                max_length: MAX_SUMMARY_LENGTH,
            })
            .await?;
        drop(scratch);

        let summary_length = summary.chars().count();
        tracing::info!(original_length, summary_length, "Document summarized");
        Ok(SummaryOutcome {
            summary,
            original_length,
            summary_length,
        })
    }
}

#[async_trait]
impl ProcessingApi for ProcessingService {
    async fn summarize_upload(&self, upload: Upload) -> Result<SummaryOutcome, ProcessingError> {
        ProcessingService::summarize_upload(self, upload).await
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Keep at most `max_chars` characters from the head of `text`, ignoring sentence boundaries.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
