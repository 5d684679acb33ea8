//! Review session state: code buffer, request lifecycle and review text.
//!
//! The lifecycle is `Idle -> Pending -> Succeeded | Failed`, and a finished
//! request may be followed by a new submission at any time. The only
//! mutators of the lifecycle are [`ReviewSession::submit`],
//! [`ReviewSession::on_success`] and [`ReviewSession::on_failure`].

use serde::Serialize;

use super::error::SubmitError;

/// Prefix prepended to failure messages shown in the display pane.
pub const ERROR_PREFIX: &str = "Error fetching review: ";

/// Code loaded into a fresh session.
pub const DEFAULT_SAMPLE_CODE: &str = r"/**
 * Calculates the sum of an arbitrary number of numeric arguments.
 * @param {...number} numbers - The numbers to sum.
 * @returns {number} The total sum.
 */
function sum(...numbers) {
  return numbers.reduce((accumulator, currentValue) => accumulator + currentValue, 0);
}";

/// Lifecycle state of the session's review request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    /// No request has been submitted yet.
    #[default]
    Idle,
    /// A request is in flight; further submissions are refused.
    Pending,
    /// The last request returned review text.
    Succeeded,
    /// The last request failed; the review text holds the error message.
    Failed,
}

/// Payload sent to the review endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRequest {
    code: String,
}

impl ReviewRequest {
    /// Code to review. Never empty for requests built by a session.
    #[must_use]
    pub const fn code(&self) -> &str {
        self.code.as_str()
    }
}

/// What the display pane should show for the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewView<'a> {
    /// Nothing has been requested yet.
    Empty,
    /// A request is in flight; show the busy indicator.
    Loading,
    /// Review text to pass through the formatting renderer.
    Review(&'a str),
    /// Plain error text, shown without formatting.
    Error(&'a str),
}

/// Per-session review state owned by the editor/viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    code: String,
    state: RequestState,
    review: String,
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewSession {
    /// Creates a session holding [`DEFAULT_SAMPLE_CODE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_code(DEFAULT_SAMPLE_CODE)
    }

    /// Creates a session holding the given code.
    #[must_use]
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            state: RequestState::Idle,
            review: String::new(),
        }
    }

    /// Current code buffer.
    #[must_use]
    pub const fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Replaces the code buffer. Does not affect an in-flight request.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Current request state.
    #[must_use]
    pub const fn state(&self) -> RequestState {
        self.state
    }

    /// Whether the busy indicator should be shown and submission disabled.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.state, RequestState::Pending)
    }

    /// Latest review text, or the latest error message after a failure.
    #[must_use]
    pub const fn review(&self) -> &str {
        self.review.as_str()
    }

    /// Starts a review of the current code buffer.
    ///
    /// On success the session enters [`RequestState::Pending`] and the
    /// returned request should be dispatched exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::AlreadyPending`] while another request is in
    /// flight and [`SubmitError::EmptyCode`] when the buffer is empty or
    /// whitespace-only. The state is unchanged in both cases.
    pub fn submit(&mut self) -> Result<ReviewRequest, SubmitError> {
        if self.is_busy() {
            return Err(SubmitError::AlreadyPending);
        }
        if self.code.trim().is_empty() {
            return Err(SubmitError::EmptyCode);
        }

        self.state = RequestState::Pending;
        Ok(ReviewRequest {
            code: self.code.clone(),
        })
    }

    /// Completes the in-flight request with review text.
    ///
    /// Ignored unless a request is pending.
    pub fn on_success(&mut self, text: impl Into<String>) {
        if !self.is_busy() {
            tracing::warn!(state = ?self.state, "ignoring review result without a pending request");
            return;
        }

        self.review = text.into();
        self.state = RequestState::Succeeded;
    }

    /// Completes the in-flight request with a failure message.
    ///
    /// The review text becomes `Error fetching review: <message>`. Ignored
    /// unless a request is pending.
    pub fn on_failure(&mut self, message: &str) {
        if !self.is_busy() {
            tracing::warn!(state = ?self.state, "ignoring review failure without a pending request");
            return;
        }

        self.review = format!("{ERROR_PREFIX}{message}");
        self.state = RequestState::Failed;
    }

    /// What the display pane should show.
    #[must_use]
    pub fn view(&self) -> ReviewView<'_> {
        match self.state {
            RequestState::Idle => ReviewView::Empty,
            RequestState::Pending => ReviewView::Loading,
            RequestState::Succeeded => ReviewView::Review(self.review.as_str()),
            RequestState::Failed => ReviewView::Error(self.review.as_str()),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
