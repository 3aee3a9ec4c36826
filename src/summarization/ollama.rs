//! Summarization through a local Ollama runtime.

use super::{SummarizationClient, SummarizationClientError, SummarizationRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Summarization via a local Ollama runtime.
///
/// Generation is pinned to temperature 0 with a fixed seed, and `num_predict` caps the output at
/// the requested maximum length.
pub struct OllamaSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
}

impl OllamaSummarizationClient {
    /// Create a client for `model` served at `base_url`.
    pub fn new(http: Client, base_url: String, model: String) -> Self {
        Self {
            http,
            base_url,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

fn build_prompt(request: &SummarizationRequest) -> String {
    format!(
        "Write an abstractive summary of the document below in plain prose. Use between {} and {} words. Do not add facts that are not in the document. Reply with the summary only.\n\nDocument:\n{}",
        request.min_length, request.max_length, request.text
    )
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl SummarizationClient for OllamaSummarizationClient {
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "model": self.model,
            "prompt": build_prompt(&request),
            "stream": false,
            "options": {
                "temperature": 0,
                "seed": 0,
                "num_predict": request.max_length,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404 (is model {} pulled?)",
                self.endpoint(),
                self.model
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Ollama response: {error}"
            ))
        })?;

        if !body.done {
            return Err(SummarizationClientError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.response)
    }
}
