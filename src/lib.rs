//! Critique library crate: AI-assisted code review.
//!
//! A code buffer is posted to a review endpoint, which forwards it to a
//! text-generation provider and returns the review verbatim. The client
//! side tracks the request lifecycle and renders the review's markup into
//! an escaped HTML fragment with highlighted code blocks.
//!
//! - [`ai`]: provider port and its OpenAI-compatible adapter
//! - [`server`]: the `POST /ai/get-review` router
//! - [`client`]: review session state, transport, and driver
//! - [`render`]: markup parsing and HTML rendering
//! - [`config`]: layered configuration
//! - [`telemetry`]: tracing subscriber set-up

pub mod ai;
pub mod client;
pub mod config;
pub mod render;
pub mod server;
pub mod telemetry;

pub use ai::{CodeReviewService, GenerationError, OpenAiCodeReviewConfig, OpenAiCodeReviewService};
pub use client::{
    HttpReviewTransport, RequestState, ReviewClient, ReviewSession, ReviewTransport, ReviewView,
    SubmitError, TransportError,
};
pub use config::{ConfigError, CritiqueConfig, OperationMode};
pub use render::{Document, ReviewRenderer, parse_document};
pub use server::{REVIEW_ROUTE, ReviewError, ServerState, build_router};
