//! HTTP surface for the review endpoint.
//!
//! The router exposes `POST /ai/get-review`, which validates the payload,
//! forwards the code to the injected [`CodeReviewService`] and relays its
//! text unchanged. Each request is handled independently; the only shared
//! value is the service handle.

mod endpoint;
mod error;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::post;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::ai::CodeReviewService;

pub use endpoint::{CODE_REQUIRED_MESSAGE, REVIEW_FAILED_MESSAGE, ReviewPayload};
pub use error::ReviewError;

/// Route path of the review endpoint.
pub const REVIEW_ROUTE: &str = "/ai/get-review";

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct ServerState {
    reviewer: Arc<dyn CodeReviewService>,
}

impl ServerState {
    /// Wraps the provider used to generate reviews.
    #[must_use]
    pub const fn new(reviewer: Arc<dyn CodeReviewService>) -> Self {
        Self { reviewer }
    }

    pub(crate) fn reviewer(&self) -> &dyn CodeReviewService {
        self.reviewer.as_ref()
    }
}

/// Builds the application router.
///
/// `allowed_origin` restricts cross-origin callers; `None` allows any origin
/// so a browser editor served from elsewhere can reach the endpoint. The
/// trace layer records requests and responses only; failed reviews are
/// logged by the handler.
#[must_use]
pub fn build_router(state: ServerState, allowed_origin: Option<HeaderValue>) -> Router {
    let cors = allowed_origin
        .map_or_else(
            || CorsLayer::new().allow_origin(Any),
            |origin| CorsLayer::new().allow_origin(origin),
        )
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(REVIEW_ROUTE, post(endpoint::get_review))
        .layer(TraceLayer::new_for_http().on_failure(()))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests;
