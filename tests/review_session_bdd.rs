//! Behavioural tests for the review request lifecycle, end to end.

mod support;

use std::sync::Arc;

use critique::ai::code_review::test_support::StubCodeReviewService;
use critique::{
    GenerationError, HttpReviewTransport, RequestState, ReviewClient, ReviewRenderer,
    ReviewSession, ReviewView, SubmitError,
};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use support::runtime::{SharedRuntime, ensure_runtime};
use support::spawn_review_endpoint;

/// Port with no listener; connections are refused.
const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:9";

#[derive(ScenarioState, Default)]
struct ReviewState {
    runtime: Slot<SharedRuntime>,
    endpoint: Slot<String>,
    reviewer: Slot<Arc<StubCodeReviewService>>,
    client: Slot<ReviewClient>,
    submission: Slot<Result<RequestState, SubmitError>>,
}

#[fixture]
fn review_state() -> ReviewState {
    ReviewState::default()
}

type StepResult = Result<(), Box<dyn std::error::Error>>;

fn start_endpoint(review_state: &ReviewState, stub: StubCodeReviewService) -> StepResult {
    let runtime = ensure_runtime(&review_state.runtime)?;
    let reviewer = Arc::new(stub);
    let endpoint = runtime.block_on(spawn_review_endpoint(reviewer.clone()))?;

    review_state.reviewer.set(reviewer);
    review_state.endpoint.set(endpoint);
    Ok(())
}

fn display_pane(review_state: &ReviewState) -> Result<String, Box<dyn std::error::Error>> {
    let renderer = ReviewRenderer::new();
    let pane = review_state
        .client
        .with_ref(|client| {
            client.with_session(|session| match session.view() {
                ReviewView::Review(text) => renderer.render(text),
                ReviewView::Error(message) => message.to_owned(),
                ReviewView::Empty | ReviewView::Loading => String::new(),
            })
        })
        .ok_or("client should be initialised before rendering")?;
    Ok(pane)
}

#[given("a review endpoint answering with {text}")]
fn given_endpoint_answering(review_state: &ReviewState, text: String) -> StepResult {
    start_endpoint(
        review_state,
        StubCodeReviewService::success(text.trim_matches('"')),
    )
}

#[given("a review endpoint whose provider fails with {text}")]
fn given_endpoint_failing(review_state: &ReviewState, text: String) -> StepResult {
    start_endpoint(
        review_state,
        StubCodeReviewService::failure(GenerationError::Api {
            message: text.trim_matches('"').to_owned(),
        }),
    )
}

#[given("an unreachable review endpoint")]
fn given_unreachable_endpoint(review_state: &ReviewState) -> StepResult {
    ensure_runtime(&review_state.runtime)?;
    review_state.endpoint.set(UNREACHABLE_ENDPOINT.to_owned());
    Ok(())
}

#[given("the code buffer contains {text}")]
fn given_code_buffer(review_state: &ReviewState, text: String) -> StepResult {
    let endpoint = review_state
        .endpoint
        .get()
        .ok_or("endpoint should be configured before the code buffer")?;
    let transport = HttpReviewTransport::new(&endpoint)?;
    let session = ReviewSession::with_code(text.trim_matches('"'));

    review_state
        .client
        .set(ReviewClient::new(session, Arc::new(transport)));
    Ok(())
}

#[when("the user requests a review")]
fn when_user_requests_review(review_state: &ReviewState) -> StepResult {
    let runtime = review_state
        .runtime
        .get()
        .ok_or("runtime should be initialised before requesting")?;
    let client = review_state
        .client
        .get()
        .ok_or("client should be initialised before requesting")?;

    let submission = runtime.block_on(client.request_review());
    review_state.submission.set(submission);
    Ok(())
}

#[then("the request state is {state}")]
fn then_request_state(review_state: &ReviewState, state: String) -> StepResult {
    let expected = state.trim_matches('"');
    let actual = review_state
        .client
        .with_ref(|client| client.snapshot().state())
        .ok_or("client should be initialised before checking state")?;

    if format!("{actual:?}") != expected {
        return Err(format!("expected state {expected}, got {actual:?}").into());
    }
    Ok(())
}

#[then("the display pane contains {text}")]
fn then_pane_contains(review_state: &ReviewState, text: String) -> StepResult {
    let expected = text.trim_matches('"');
    let pane = display_pane(review_state)?;

    if !pane.contains(expected) {
        return Err(format!("expected pane to contain '{expected}', got:\n{pane}").into());
    }
    Ok(())
}

#[then("the display pane does not contain {text}")]
fn then_pane_does_not_contain(review_state: &ReviewState, text: String) -> StepResult {
    let unexpected = text.trim_matches('"');
    let pane = display_pane(review_state)?;

    if pane.contains(unexpected) {
        return Err(format!("expected pane not to contain '{unexpected}', got:\n{pane}").into());
    }
    Ok(())
}

#[then("the submission is refused with {text}")]
fn then_submission_refused(review_state: &ReviewState, text: String) -> StepResult {
    let expected = text.trim_matches('"');
    let submission = review_state
        .submission
        .get()
        .ok_or("a submission should have been attempted")?;

    match submission {
        Err(error) if error.to_string() == expected => Ok(()),
        other => Err(format!("expected refusal '{expected}', got {other:?}").into()),
    }
}

#[then("the endpoint received {count:usize} requests")]
fn then_endpoint_received(review_state: &ReviewState, count: usize) -> StepResult {
    let calls = review_state
        .reviewer
        .with_ref(|reviewer| reviewer.call_count())
        .ok_or("endpoint should have been started")?;

    if calls != count {
        return Err(format!("expected {count} provider calls, got {calls}").into());
    }
    Ok(())
}

#[scenario(path = "tests/features/review_session.feature", index = 0)]
fn successful_review_is_rendered(review_state: ReviewState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_session.feature", index = 1)]
fn provider_failure_shows_generic_error(review_state: ReviewState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_session.feature", index = 2)]
fn blank_code_is_refused_locally(review_state: ReviewState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_session.feature", index = 3)]
fn unreachable_endpoint_is_reported(review_state: ReviewState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_session.feature", index = 4)]
fn review_markup_cannot_inject_scripts(review_state: ReviewState) {
    let _ = review_state;
}
