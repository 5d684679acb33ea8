//! Drives review requests from a shared session through a transport.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::error::SubmitError;
use super::session::{RequestState, ReviewRequest, ReviewSession};
use super::transport::ReviewTransport;

/// Couples a session with the transport used to reach the endpoint.
///
/// The session lock is released while the request is in flight, so the
/// session stays observable (busy indicator, code edits) and a concurrent
/// submission is refused by the session instead of being queued.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    session: Arc<Mutex<ReviewSession>>,
    transport: Arc<dyn ReviewTransport>,
}

impl ReviewClient {
    /// Creates a client around an existing session.
    #[must_use]
    pub fn new(session: ReviewSession, transport: Arc<dyn ReviewTransport>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            transport,
        }
    }

    /// Runs `action` with exclusive access to the session.
    pub fn with_session<T>(&self, action: impl FnOnce(&mut ReviewSession) -> T) -> T {
        action(&mut self.lock())
    }

    /// Returns a copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> ReviewSession {
        self.lock().clone()
    }

    /// Submits the current code and waits for the outcome.
    ///
    /// Exactly one transport call is made per accepted submission. Transport
    /// failures are recorded in the session rather than returned.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the session refuses the submission; no
    /// network call is made in that case.
    pub async fn request_review(&self) -> Result<RequestState, SubmitError> {
        let request = self.begin_review()?;
        Ok(self.complete_review(&request).await)
    }

    /// Moves the session to `Pending` and returns the request to send.
    ///
    /// Callers that show the busy indicator do so between this call and
    /// [`Self::complete_review`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] when the session refuses the submission.
    pub fn begin_review(&self) -> Result<ReviewRequest, SubmitError> {
        let request = self.lock().submit()?;
        tracing::debug!(code_len = request.code().len(), "review request dispatched");
        Ok(request)
    }

    /// Sends an accepted request and records its outcome in the session.
    pub async fn complete_review(&self, request: &ReviewRequest) -> RequestState {
        let outcome = self.transport.fetch_review(request).await;

        let mut session = self.lock();
        match outcome {
            Ok(text) => session.on_success(text),
            Err(error) => {
                tracing::warn!(error = %error, "review request failed");
                session.on_failure(&error.to_string());
            }
        }
        session.state()
    }

    fn lock(&self) -> MutexGuard<'_, ReviewSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
