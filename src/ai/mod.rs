//! AI integration for automated code review.
//!
//! The review endpoint talks to the text-generation provider exclusively
//! through the [`CodeReviewService`] port so tests can substitute a
//! deterministic implementation.

pub mod code_review;
mod error;

pub use code_review::{
    CodeReviewService, OpenAiCodeReviewConfig, OpenAiCodeReviewService, REVIEW_SYSTEM_PROMPT,
};
pub use error::GenerationError;
