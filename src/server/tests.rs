//! Router-level tests for the review endpoint.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use mockall::mock;
use rstest::rstest;
use serde_json::json;
use tower::ServiceExt;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::ai::code_review::test_support::StubCodeReviewService;
use crate::ai::{CodeReviewService, GenerationError};

use super::{REVIEW_ROUTE, ReviewError, ReviewPayload, ServerState, build_router};

mock! {
    pub Reviewer {}

    impl std::fmt::Debug for Reviewer {
        fn fmt<'a>(&self, f: &mut std::fmt::Formatter<'a>) -> std::fmt::Result;
    }

    #[async_trait]
    impl CodeReviewService for Reviewer {
        async fn review_code(&self, code: &str) -> Result<String, GenerationError>;
    }
}

fn review_request(body: impl Into<Body>) -> Request<Body> {
    Request::post(REVIEW_ROUTE)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request should build")
}

async fn send(
    service: Arc<dyn CodeReviewService>,
    body: impl Into<Body>,
) -> (StatusCode, String) {
    let router = build_router(ServerState::new(service), None);
    let response = router
        .oneshot(review_request(body))
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let text = String::from_utf8(bytes.to_vec()).expect("body should be UTF-8");
    (status, text)
}

#[tokio::test]
async fn valid_code_returns_generated_text_verbatim() {
    let stub = StubCodeReviewService::success("## Looks fine");
    let (status, body) = send(
        Arc::new(stub.clone()),
        json!({ "code": "function f(){}" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "## Looks fine");
    assert_eq!(stub.call_count(), 1);
}

#[rstest]
#[case::empty_object("{}")]
#[case::null_code(r#"{"code": null}"#)]
#[case::empty_code(r#"{"code": ""}"#)]
#[case::numeric_code(r#"{"code": 42}"#)]
#[case::array_body(r#"["function f(){}"]"#)]
#[case::malformed_json("{\"code\": ")]
#[case::empty_body("")]
#[tokio::test]
async fn missing_code_is_rejected_without_calling_provider(#[case] body: &'static str) {
    let mut reviewer = MockReviewer::new();
    reviewer.expect_review_code().never();

    let (status, text) = send(Arc::new(reviewer), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Code is required");
}

#[tokio::test]
async fn provider_failure_returns_generic_message() {
    let stub = StubCodeReviewService::failure(GenerationError::Api {
        message: "quota exhausted for key sk-secret".to_owned(),
    });
    let (status, body) = send(
        Arc::new(stub),
        json!({ "code": "function f(){}" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to process the code review");
    assert!(!body.contains("quota"), "provider detail leaked: {body}");
}

/// In-memory sink for formatted log lines.
#[derive(Debug, Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn provider_failure_logs_exactly_one_error_line() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);
    let stub = StubCodeReviewService::failure(GenerationError::Api {
        message: "boom".to_owned(),
    });

    let (status, _body) = send(
        Arc::new(stub),
        json!({ "code": "function f(){}" }).to_string(),
    )
    .await;

    let output = logs.contents();
    let errors: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("ERROR"))
        .collect();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(errors.len(), 1, "unexpected error lines:\n{output}");
    assert!(
        errors.iter().all(|line| line.contains("review generation failed")),
        "unexpected error lines:\n{output}"
    );
}

#[tokio::test]
async fn provider_receives_code_unchanged() {
    let mut reviewer = MockReviewer::new();
    reviewer
        .expect_review_code()
        .withf(|code: &str| code == "  let x = 1;\n")
        .times(1)
        .returning(|_| Ok("ok".to_owned()));

    let (status, body) = send(
        Arc::new(reviewer),
        json!({ "code": "  let x = 1;\n" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn whitespace_code_is_forwarded() {
    let stub = StubCodeReviewService::success("nothing to review");
    let (status, _) = send(Arc::new(stub.clone()), json!({ "code": "   " }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(stub.call_count(), 1);
}

#[tokio::test]
async fn get_is_not_routed() {
    let router = build_router(
        ServerState::new(Arc::new(StubCodeReviewService::success("unused"))),
        None,
    );
    let response = router
        .oneshot(
            Request::get(REVIEW_ROUTE)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[rstest]
#[case(ReviewError::Validation, StatusCode::BAD_REQUEST, "Code is required")]
#[case(
    ReviewError::Upstream { message: "boom".to_owned() },
    StatusCode::INTERNAL_SERVER_ERROR,
    "Failed to process the code review"
)]
fn review_error_maps_to_fixed_responses(
    #[case] error: ReviewError,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    assert_eq!(error.status(), status);
    assert_eq!(error.public_message(), message);
}

#[test]
fn payload_extracts_code_from_object() {
    let payload = ReviewPayload::from_body(br#"{"code": "x", "extra": true}"#);

    assert_eq!(payload.require_code(), Ok("x"));
}
