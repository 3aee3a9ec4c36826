//! Summarization through a Hugging Face inference endpoint.

use super::{SummarizationClient, SummarizationClientError, SummarizationRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Client for the Hugging Face inference API (or a compatible self-hosted endpoint) running a
/// summarization pipeline.
pub struct HuggingFaceSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
}

impl HuggingFaceSummarizationClient {
    /// Create a client targeting `{base_url}/models/{model}`.
    pub fn new(http: Client, base_url: String, model: String, api_token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            model,
            api_token,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.base_url.trim_end_matches('/'),
            self.model.trim_matches('/')
        )
    }
}

#[derive(Debug, Deserialize)]
struct SummaryCandidate {
    summary_text: String,
}

#[async_trait]
impl SummarizationClient for HuggingFaceSummarizationClient {
    async fn generate_summary(
        &self,
        request: SummarizationRequest,
    ) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "inputs": request.text,
            "parameters": {
                "min_length": request.min_length,
                "max_length": request.max_length,
                "do_sample": false,
            },
            "options": {
                "wait_for_model": true,
                "use_cache": true,
            }
        });

        tracing::debug!(
            model = %self.model,
            chars = request.text.chars().count(),
            "Requesting summary"
        );
        let mut builder = self.http.post(self.endpoint()).json(&payload);
        if let Some(token) = self.api_token.as_deref() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|error| {
            SummarizationClientError::ProviderUnavailable(format!(
                "failed to reach inference endpoint at {}: {error}",
                self.base_url
            ))
        })?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "model {} is not ready: {body}",
                self.model
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "inference endpoint returned {status}: {body}"
            )));
        }

        let candidates: Vec<SummaryCandidate> = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode inference response: {error}"
            ))
        })?;

        candidates
            .into_iter()
            .next()
            .map(|candidate| candidate.summary_text)
            .ok_or_else(|| {
                SummarizationClientError::InvalidResponse("no summary candidates returned".into())
            })
    }
}
