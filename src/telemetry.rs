//! Tracing subscriber set-up for the `critique` binary.
//!
//! Library code only emits `tracing` events. The binary installs one fmt
//! subscriber writing to stderr, so review output on stdout stays clean.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const FALLBACK_FILTER: &str = "info";

/// Failure to install the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to initialise tracing: {message}")]
    Initialisation {
        /// Diagnostic from `tracing-subscriber`.
        message: String,
    },
}

/// Builds the event filter.
///
/// `RUST_LOG` wins when it is set and valid. Otherwise `default_filter` is
/// used, and an invalid `default_filter` falls back to `info`.
#[must_use]
pub fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Installs the global fmt subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError::Initialisation`] when a subscriber is already
/// installed for this process.
pub fn init_tracing(default_filter: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(build_filter(default_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|error| TelemetryError::Initialisation {
            message: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::build_filter;

    #[rstest]
    #[case::default_used_without_rust_log(None, "critique=debug", "critique=debug")]
    #[case::rust_log_wins(Some("warn"), "critique=debug", "warn")]
    #[case::invalid_rust_log_ignored(Some("critique=loud"), "debug", "debug")]
    #[case::invalid_default_falls_back(None, "critique=loud", "info")]
    fn filter_resolution(
        #[case] rust_log: Option<&str>,
        #[case] default_filter: &str,
        #[case] expected: &str,
    ) {
        let _guard = env_lock::lock_env([("RUST_LOG", rust_log)]);

        let filter = build_filter(default_filter);

        assert_eq!(filter.to_string(), expected);
    }
}
