use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing summarization activity since startup.
#[derive(Default)]
pub struct SummaryMetrics {
    documents_summarized: AtomicU64,
    characters_summarized: AtomicU64,
    rejected_documents: AtomicU64,
    failed_documents: AtomicU64,
}

impl SummaryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful summary and the number of input characters fed to the model.
    pub fn record_summary(&self, input_chars: u64) {
        self.documents_summarized.fetch_add(1, Ordering::Relaxed);
        self.characters_summarized
            .fetch_add(input_chars, Ordering::Relaxed);
    }

    /// Record a document rejected because of caller input.
    pub fn record_rejection(&self) {
        self.rejected_documents.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a document that failed on the server side.
    pub fn record_failure(&self) {
        self.failed_documents.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_summarized: self.documents_summarized.load(Ordering::Relaxed),
            characters_summarized: self.characters_summarized.load(Ordering::Relaxed),
            rejected_documents: self.rejected_documents.load(Ordering::Relaxed),
            failed_documents: self.failed_documents.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of summarization counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of documents summarized successfully.
    pub documents_summarized: u64,
    /// Total characters passed to the model across successful summaries.
    pub characters_summarized: u64,
    /// Documents rejected with a client error (bad extension, no text, ...).
    pub rejected_documents: u64,
    /// Documents that failed with a server error.
    pub failed_documents: u64,
}
