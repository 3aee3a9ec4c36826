//! HTTP surface for docsum.
//!
//! - `POST /summarize` – Multipart upload with a `file` field (`.pdf` or `.txt`). Returns
//!   `{ "summary", "original_length", "summary_length" }`. Caller mistakes produce `400` with
//!   `{ "error" }` (`413` when the body exceeds the upload ceiling); anything else produces `500`
//!   with `{ "error", "details" }`.
//! - `GET /metrics` – Summarization counters since startup.
//! - `GET /health` – Liveness probe.
//!
//! Cross-origin requests are allowed from any origin.

use crate::processing::{ProcessingApi, ProcessingError, Upload};
use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::Instrument;
use uuid::Uuid;

/// Multipart field that carries the document.
pub const UPLOAD_FIELD: &str = "file";

const PROCESSING_FAILED_MESSAGE: &str = "An error occurred while processing the file";

/// Build the HTTP router exposing the summarization API surface.
pub fn create_router<S>(service: Arc<S>, max_upload_bytes: usize) -> Router
where
    S: ProcessingApi + 'static,
{
    Router::new()
        .route("/summarize", post(summarize_document::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Success response for `POST /summarize`.
#[derive(Serialize)]
struct SummaryResponse {
    /// Generated summary text.
    summary: String,
    /// Character count of the text that was summarized (after truncation).
    original_length: usize,
    /// Character count of the summary.
    summary_length: usize,
}

/// Summarize an uploaded document.
async fn summarize_document<S>(
    State(service): State<Arc<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResponse>, AppError>
where
    S: ProcessingApi,
{
    let span = tracing::info_span!("summarize", request_id = %Uuid::new_v4());
    async move {
        let result = match read_upload(multipart).await {
            Ok(upload) => service.summarize_upload(upload).await,
            Err(error) => Err(error),
        };
        match result {
            Ok(outcome) => {
                tracing::info!(
                    original_length = outcome.original_length,
                    summary_length = outcome.summary_length,
                    "Summarize request completed"
                );
                Ok(Json(SummaryResponse {
                    summary: outcome.summary,
                    original_length: outcome.original_length,
                    summary_length: outcome.summary_length,
                }))
            }
            Err(error) if error.is_client_error() => {
                tracing::warn!(%error, "Rejected upload");
                Err(AppError(error))
            }
            Err(error) => {
                tracing::error!(%error, "Failed to summarize upload");
                Err(AppError(error))
            }
        }
    }
    .instrument(span)
    .await
}

/// Pull the `file` part out of the multipart body.
///
/// A missing body or a missing `file` part (including a `file` part sent as a plain form value)
/// is [`ProcessingError::MissingFile`]; a file part with an empty filename or an unreadable body
/// is [`ProcessingError::InvalidFile`]; a body cut off by the upload ceiling is
/// [`ProcessingError::PayloadTooLarge`].
async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Upload, ProcessingError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "Request is not a multipart upload");
        ProcessingError::MissingFile
    })?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ProcessingError::MissingFile),
            Err(error) => {
                tracing::debug!(%error, "Malformed multipart body");
                return Err(unreadable_upload(&error));
            }
        };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Err(ProcessingError::InvalidFile);
        }
        let bytes = field.bytes().await.map_err(|error| {
            tracing::debug!(%error, "Failed to read upload body");
            unreadable_upload(&error)
        })?;
        return Ok(Upload { filename, bytes });
    }
}

fn unreadable_upload(error: &MultipartError) -> ProcessingError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ProcessingError::PayloadTooLarge
    } else {
        ProcessingError::InvalidFile
    }
}

/// Return a snapshot of summarization counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<crate::metrics::MetricsSnapshot>
where
    S: ProcessingApi,
{
    Json(service.metrics_snapshot())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

struct AppError(ProcessingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            let status = match self.0 {
                ProcessingError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            (
                status,
                Json(json!({ "error": self.0.to_string() })),
            )
                .into_response()
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": PROCESSING_FAILED_MESSAGE,
                    "details": self.0.to_string(),
                })),
            )
                .into_response()
        }
    }
}
