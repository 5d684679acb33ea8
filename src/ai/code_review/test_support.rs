//! Test-support utilities for code review generation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::ai::GenerationError;

use super::CodeReviewService;

/// Deterministic review-service stub used by unit and behavioural tests.
///
/// Counts calls so tests can assert that invalid input never reaches the
/// provider.
#[derive(Debug, Clone)]
pub struct StubCodeReviewService {
    response: Result<String, GenerationError>,
    calls: Arc<AtomicUsize>,
}

impl StubCodeReviewService {
    /// Creates a stub that always returns the provided review text.
    #[must_use]
    pub fn success(review_text: impl Into<String>) -> Self {
        Self {
            response: Ok(review_text.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a stub that always returns the provided error.
    #[must_use]
    pub fn failure(error: GenerationError) -> Self {
        Self {
            response: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times [`CodeReviewService::review_code`] was invoked.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CodeReviewService for StubCodeReviewService {
    async fn review_code(&self, _code: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}
