//! Code review generation: the provider port and its OpenAI-compatible
//! adapter.

mod openai;
mod prompt;
mod service;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use openai::{OpenAiCodeReviewConfig, OpenAiCodeReviewService};
pub use prompt::REVIEW_SYSTEM_PROMPT;
pub use service::CodeReviewService;
