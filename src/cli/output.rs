//! Display pane output for review mode.

use std::io::{self, Write};

use critique::{ReviewRenderer, ReviewView};

use super::error::{CliError, io_error};

/// Busy indicator shown while a review request is pending.
pub const LOADING_INDICATOR: &str = "Loading...\n";

/// Content of the display pane for `view`.
///
/// Reviews are rendered to HTML; errors are shown as plain text so the
/// message is read literally.
#[must_use]
pub fn display_pane(view: ReviewView<'_>, renderer: &ReviewRenderer) -> String {
    match view {
        ReviewView::Review(text) => renderer.render(text),
        ReviewView::Error(message) => format!("{message}\n"),
        ReviewView::Loading => LOADING_INDICATOR.to_owned(),
        ReviewView::Empty => String::new(),
    }
}

/// Writes the display pane to `destination`, or stdout when unset.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the destination cannot be written.
pub async fn write_display(destination: Option<&str>, content: &str) -> Result<(), CliError> {
    match destination {
        Some(path) => tokio::fs::write(path, content)
            .await
            .map_err(|error| io_error(path, &error)),
        None => write_display_to(&mut io::stdout().lock(), content),
    }
}

/// Writes the display pane to the given writer.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the writer fails.
pub fn write_display_to<W: Write>(writer: &mut W, content: &str) -> Result<(), CliError> {
    write!(writer, "{content}")
        .and_then(|()| writer.flush())
        .map_err(|error| io_error("output", &error))
}
