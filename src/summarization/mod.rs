//! Abstractive summarization backed by a pretrained model.
//!
//! The pipeline talks to the model through [`SummarizationClient`]. Two adapters are provided:
//! a Hugging Face inference endpoint serving a seq2seq checkpoint (`facebook/bart-large-cnn` by
//! default) and a local Ollama runtime. Both request deterministic decoding so the same input
//! always produces the same summary. The client is built once at startup and shared.

mod huggingface;
mod ollama;

use crate::config::{Config, SummarizationProvider};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;

pub use huggingface::HuggingFaceSummarizationClient;
pub use ollama::OllamaSummarizationClient;

/// Errors surfaced while attempting abstractive summarization.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider was unreachable or still loading the model.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Input handed to the summarization provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationRequest {
    /// Text to summarize, already bounded by the caller.
    pub text: String,
    /// Minimum summary length in model tokens.
    pub min_length: usize,
    /// Maximum summary length in model tokens.
    pub max_length: usize,
}

/// Interface implemented by abstractive summarization providers.
///
/// Implementations must decode deterministically (no sampling) and return the single best
/// candidate when the model produces several.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Generate a summary for `request.text`.
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError>;
}

/// Build the summarization client selected by configuration.
pub fn build_summarization_client(
    config: &Config,
) -> Result<Arc<dyn SummarizationClient>, SummarizationClientError> {
    let http = http_client()?;
    let client: Arc<dyn SummarizationClient> = match config.summarization_provider {
        SummarizationProvider::HuggingFace => Arc::new(HuggingFaceSummarizationClient::new(
            http,
            config.huggingface_api_url.clone(),
            config.summarization_model.clone(),
            config.huggingface_api_token.clone(),
        )),
        SummarizationProvider::Ollama => Arc::new(OllamaSummarizationClient::new(
            http,
            config.ollama_url.clone(),
            config.summarization_model.clone(),
        )),
    };
    tracing::info!(
        provider = ?config.summarization_provider,
        model = %config.summarization_model,
        "Summarization client initialized"
    );
    Ok(client)
}

fn http_client() -> Result<Client, SummarizationClientError> {
    Client::builder()
        .user_agent(concat!("docsum/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|error| {
            SummarizationClientError::ProviderUnavailable(format!(
                "failed to construct HTTP client: {error}"
            ))
        })
}
