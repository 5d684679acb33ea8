//! Error types raised by the text-generation provider adapter.

use thiserror::Error;

/// Failures of a single generation call.
///
/// These never leave the server process: the review endpoint logs them and
/// answers with a generic message instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The adapter is missing settings it needs to call the provider.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the missing or invalid setting.
        message: String,
    },

    /// The provider could not be reached.
    #[error("network error talking to the AI provider: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The provider answered, but not with usable text.
    #[error("AI provider error: {message}")]
    Api {
        /// Status or decoding detail describing the failure.
        message: String,
    },
}
