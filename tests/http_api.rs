use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use docsum::{
    api,
    processing::ProcessingService,
    summarization::{HuggingFaceSummarizationClient, SummarizationClient},
};
use httpmock::{Method::POST, Mock, MockServer};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "docsum-integration";
const MODEL: &str = "facebook/bart-large-cnn";
const MODEL_PATH: &str = "/models/facebook/bart-large-cnn";

struct TestHarness {
    server: MockServer,
    scratch: TempDir,
    app: Router,
}

impl TestHarness {
    async fn new() -> Self {
        let server = MockServer::start_async().await;
        let scratch = tempfile::tempdir().expect("scratch dir");
        let http = reqwest::Client::builder()
            .user_agent("docsum-integration")
            .build()
            .expect("http client");
        let summarizer: Arc<dyn SummarizationClient> = Arc::new(
            HuggingFaceSummarizationClient::new(http, server.base_url(), MODEL.into(), None),
        );
        let service = Arc::new(ProcessingService::new(
            summarizer,
            scratch.path().join("temp"),
        ));
        let app = api::create_router(service, 4 * 1024 * 1024);
        Self {
            server,
            scratch,
            app,
        }
    }

    async fn mock_summary(&self, summary: &str) -> Mock<'_> {
        let body = json!([{ "summary_text": summary }]);
        self.server
            .mock_async(move |when, then| {
                when.method(POST).path(MODEL_PATH).json_body_partial(
                    r#"{"parameters": {"min_length": 30, "max_length": 130, "do_sample": false}}"#,
                );
                then.status(200).json_body(body);
            })
            .await
    }

    async fn upload(
        &self,
        filename: Option<&str>,
        field: &str,
        contents: &[u8],
    ) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/summarize")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(multipart_body(field, filename, contents)))
                    .expect("request"),
            )
            .await
            .expect("router response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).expect("json body"))
    }

    async fn metrics(&self) -> Value {
        let response = self
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json body")
    }

    fn scratch_is_empty(&self) -> bool {
        scratch_entries(&self.scratch.path().join("temp")) == 0
    }
}

fn scratch_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|iter| iter.count()).unwrap_or(0)
}

fn multipart_body(field: &str, filename: Option<&str>, contents: &[u8]) -> Vec<u8> {
    let mut body = format!("--{BOUNDARY}\r\n").into_bytes();
    let disposition = match filename {
        Some(filename) => format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        ),
        None => format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n"),
    };
    body.extend_from_slice(disposition.as_bytes());
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn single_page_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 18.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

#[tokio::test]
async fn text_upload_is_summarized() {
    let harness = TestHarness::new().await;
    let mock = harness.mock_summary("The committee approved the budget.").await;

    let (status, body) = harness
        .upload(
            Some("minutes.txt"),
            "file",
            b"The committee met on Tuesday and approved next year's budget after a long debate.",
        )
        .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["summary"], "The committee approved the budget.");
    assert_eq!(body["original_length"], 81);
    assert_eq!(body["summary_length"], 34);
    mock.assert_async().await;
    assert!(harness.scratch_is_empty());
}

#[tokio::test]
async fn model_output_is_returned_verbatim() {
    let harness = TestHarness::new().await;
    harness.mock_summary(" Padded summary. ").await;

    let (status, body) = harness
        .upload(Some("padded.txt"), "file", b"Text that yields a padded summary.")
        .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["summary"], " Padded summary. ");
    assert_eq!(body["summary_length"], 17);
}

#[tokio::test]
async fn pdf_upload_is_summarized() {
    let harness = TestHarness::new().await;
    let mock = harness.mock_summary("Sales increased.").await;

    let (status, body) = harness
        .upload(
            Some("Report.PDF"),
            "file",
            &single_page_pdf("Sales increased in every region this quarter"),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["summary"], "Sales increased.");
    mock.assert_async().await;
    assert!(harness.scratch_is_empty());
}

#[tokio::test]
async fn long_text_is_truncated_before_the_model_sees_it() {
    let harness = TestHarness::new().await;
    let mock = harness.mock_summary("Repetitive text.").await;
    let long_text = "word ".repeat(1000);

    let (status, body) = harness
        .upload(Some("long.txt"), "file", long_text.as_bytes())
        .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["original_length"], 1024);
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let harness = TestHarness::new().await;

    let (status, body) = harness
        .upload(Some("notes.txt"), "attachment", b"content")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn unsupported_extension_lists_allowed_types() {
    let harness = TestHarness::new().await;

    let (status, body) = harness.upload(Some("a.doc"), "file", b"content").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().expect("error message");
    assert!(error.contains("pdf, txt"), "error: {error}");
}

#[tokio::test]
async fn whitespace_only_text_is_rejected_and_scratch_cleared() {
    let harness = TestHarness::new().await;

    let (status, body) = harness
        .upload(Some("blank.txt"), "file", b"   \n\t\n   ")
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No text could be extracted from the file");
    assert!(harness.scratch_is_empty());
    assert_eq!(harness.metrics().await["rejected_documents"], 1);
}

#[tokio::test]
async fn invalid_pdf_is_a_server_error() {
    let harness = TestHarness::new().await;

    let (status, body) = harness
        .upload(Some("broken.pdf"), "file", b"%PDF-1.4 truncated garbage")
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An error occurred while processing the file");
    let details = body["details"].as_str().expect("details");
    assert!(details.starts_with("Error extracting text: "), "details: {details}");
    assert!(harness.scratch_is_empty());
}

#[tokio::test]
async fn model_outage_is_a_server_error() {
    let harness = TestHarness::new().await;
    harness
        .server
        .mock_async(|when, then| {
            when.method(POST).path(MODEL_PATH);
            then.status(500).body("CUDA out of memory");
        })
        .await;

    let (status, body) = harness
        .upload(Some("notes.txt"), "file", b"Plenty of meaningful text to summarize.")
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let details = body["details"].as_str().expect("details");
    assert!(details.contains("CUDA out of memory"), "details: {details}");
    assert_eq!(
        details.matches("Failed to generate summary").count(),
        1,
        "details: {details}"
    );
    assert!(harness.scratch_is_empty());
    assert_eq!(harness.metrics().await["failed_documents"], 1);
}

#[tokio::test]
async fn repeated_requests_yield_identical_summaries() {
    let harness = TestHarness::new().await;
    let mock = harness.mock_summary("Stable summary.").await;

    let first = harness.upload(Some("same.txt"), "file", b"Identical input text.").await;
    let second = harness.upload(Some("same.txt"), "file", b"Identical input text.").await;

    assert_eq!(first, second);
    assert_eq!(mock.hits_async().await, 2);
    assert_eq!(harness.metrics().await["documents_summarized"], 2);
}
