//! Error types raised on the client side of the review pipeline.

use thiserror::Error;

/// Reasons a submission is refused locally, before any network call.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The code buffer is empty or whitespace-only.
    #[error("Code is required")]
    EmptyCode,
    /// A request from this session is still in flight.
    #[error("a review request is already in progress")]
    AlreadyPending,
}

/// Failures reaching the review endpoint or reading its answer.
///
/// The display text of these errors is what the viewer shows after the
/// `Error fetching review: ` prefix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint could not be reached.
    #[error("{message}")]
    Unreachable {
        /// Transport-level error detail.
        message: String,
    },
    /// The endpoint answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Status {
        /// HTTP status code returned by the endpoint.
        status: u16,
    },
    /// The response body could not be read.
    #[error("failed to read review response: {message}")]
    Body {
        /// Read or decoding error detail.
        message: String,
    },
    /// The configured endpoint URL is unusable.
    #[error("invalid review endpoint URL: {message}")]
    InvalidEndpoint {
        /// URL parsing error detail.
        message: String,
    },
}
