//! Provider port for generating a review from source code.

use async_trait::async_trait;

use crate::ai::GenerationError;

/// Generates review text for a piece of source code.
///
/// Implementations receive the code verbatim and return the provider's text
/// unchanged. Any failure (network, provider, quota) is reported as a
/// [`GenerationError`]; callers decide how much of it to surface.
#[async_trait]
pub trait CodeReviewService: Send + Sync + std::fmt::Debug {
    /// Requests a review of `code`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the provider call fails.
    async fn review_code(&self, code: &str) -> Result<String, GenerationError>;
}
