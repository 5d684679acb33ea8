//! Review mode: submit the code buffer and print the display pane.

use std::io::{self, Write};
use std::sync::Arc;

use critique::client::DEFAULT_SAMPLE_CODE;
use critique::{
    CritiqueConfig, HttpReviewTransport, RequestState, ReviewClient, ReviewRenderer,
    ReviewSession, ReviewTransport,
};
use tokio::io::AsyncReadExt;

use super::error::{CliError, io_error};
use super::output::{display_pane, write_display, write_display_to};

/// `--code-file` value that reads the code buffer from standard input.
pub const STDIN_SOURCE: &str = "-";

/// Final session state and the display pane it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    /// State after the request completed.
    pub state: RequestState,
    /// Rendered review, or the plain error text.
    pub pane: String,
}

impl ReviewOutcome {
    /// Converts a failed request into an error for the exit status.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::ReviewFailed`] when the request failed.
    pub fn into_result(self) -> Result<(), CliError> {
        match self.state {
            RequestState::Failed => Err(CliError::ReviewFailed),
            RequestState::Idle | RequestState::Pending | RequestState::Succeeded => Ok(()),
        }
    }
}

/// Runs review mode against the configured endpoint.
///
/// # Errors
///
/// Returns [`CliError::Configuration`] for an invalid endpoint,
/// [`CliError::Io`] when the code cannot be read or the pane cannot be
/// written, [`CliError::Validation`] for a blank buffer, and
/// [`CliError::ReviewFailed`] when the request fails.
pub async fn run(config: &CritiqueConfig) -> Result<(), CliError> {
    let endpoint = config.endpoint_base_url()?;
    let transport =
        HttpReviewTransport::new(endpoint.as_str()).map_err(|error| CliError::Configuration {
            message: error.to_string(),
        })?;
    tracing::info!(endpoint = %transport.endpoint(), "requesting review");

    let code = load_code(config.code_file.as_deref()).await?;
    let renderer = ReviewRenderer::new();
    let outcome = review_code(code, Arc::new(transport), &renderer, &mut io::stderr()).await?;

    write_display(config.output.as_deref(), &outcome.pane).await?;
    outcome.into_result()
}

/// Loads the code buffer from a file, standard input, or the sample.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the source cannot be read.
pub async fn load_code(source: Option<&str>) -> Result<String, CliError> {
    match source {
        None => Ok(DEFAULT_SAMPLE_CODE.to_owned()),
        Some(STDIN_SOURCE) => {
            let mut code = String::new();
            tokio::io::stdin()
                .read_to_string(&mut code)
                .await
                .map_err(|error| io_error("stdin", &error))?;
            Ok(code)
        }
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|error| io_error(path, &error)),
    }
}

/// Submits `code` once through `transport` and renders the outcome.
///
/// The busy indicator is written to `busy` once the submission is accepted
/// and before the request is awaited, keeping it apart from the final pane.
///
/// # Errors
///
/// Returns [`CliError::Validation`] when the session refuses the buffer;
/// no request is sent in that case. Returns [`CliError::Io`] when the busy
/// indicator cannot be written.
pub async fn review_code<W: Write>(
    code: String,
    transport: Arc<dyn ReviewTransport>,
    renderer: &ReviewRenderer,
    busy: &mut W,
) -> Result<ReviewOutcome, CliError> {
    let client = ReviewClient::new(ReviewSession::with_code(code), transport);
    let request = client
        .begin_review()
        .map_err(|error| CliError::Validation {
            message: error.to_string(),
        })?;
    let indicator = client.with_session(|session| display_pane(session.view(), renderer));
    write_display_to(busy, &indicator)?;

    let state = client.complete_review(&request).await;
    let pane = client.with_session(|session| display_pane(session.view(), renderer));

    Ok(ReviewOutcome { state, pane })
}
