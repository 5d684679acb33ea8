//! Errors surfaced by the `critique` binary.

use thiserror::Error;

use critique::ConfigError;

/// Failure of a command-line run. Every variant exits non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Configuration could not be loaded or holds invalid values.
    #[error("configuration error: {message}")]
    Configuration {
        /// Diagnostic message.
        message: String,
    },
    /// Reading the code buffer or writing the review failed.
    #[error("I/O error: {message}")]
    Io {
        /// Diagnostic message.
        message: String,
    },
    /// The code buffer was refused before any request was sent.
    #[error("{message}")]
    Validation {
        /// Diagnostic message.
        message: String,
    },
    /// The review request completed with an error; the display pane holds
    /// the message.
    #[error("review request failed")]
    ReviewFailed,
    /// The review endpoint could not be started or stopped unexpectedly.
    #[error("server error: {message}")]
    Server {
        /// Diagnostic message.
        message: String,
    },
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}

/// Wraps an I/O failure with the path or stream it concerns.
#[must_use]
pub fn io_error(context: &str, error: &std::io::Error) -> CliError {
    CliError::Io {
        message: format!("{context}: {error}"),
    }
}
