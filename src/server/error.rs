//! Error types surfaced by the review endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::endpoint::{CODE_REQUIRED_MESSAGE, REVIEW_FAILED_MESSAGE};

/// Failures of a single review request, mapped onto HTTP responses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// The payload did not carry a usable `code` field.
    #[error("code is required")]
    Validation,

    /// The review provider failed.
    ///
    /// `message` is kept for server-side diagnostics only and is never
    /// written to the response body.
    #[error("review generation failed: {message}")]
    Upstream {
        /// Provider failure detail.
        message: String,
    },
}

impl ReviewError {
    /// HTTP status reported to the caller.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed body reported to the caller.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Validation => CODE_REQUIRED_MESSAGE,
            Self::Upstream { .. } => REVIEW_FAILED_MESSAGE,
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}
