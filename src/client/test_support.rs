//! Test-support transports for driving review sessions without a server.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use super::error::TransportError;
use super::session::ReviewRequest;
use super::transport::ReviewTransport;

/// Transport stub that answers immediately and records submitted code.
#[derive(Debug, Clone)]
pub struct StubReviewTransport {
    response: Result<String, TransportError>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubReviewTransport {
    /// Creates a stub that always returns the provided review text.
    #[must_use]
    pub fn success(review_text: impl Into<String>) -> Self {
        Self {
            response: Ok(review_text.into()),
            requests: Arc::default(),
        }
    }

    /// Creates a stub that always returns the provided error.
    #[must_use]
    pub fn failure(error: TransportError) -> Self {
        Self {
            response: Err(error),
            requests: Arc::default(),
        }
    }

    /// Code of every request received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ReviewTransport for StubReviewTransport {
    async fn fetch_review(&self, request: &ReviewRequest) -> Result<String, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.code().to_owned());
        self.response.clone()
    }
}

/// Transport stub that holds each request until released.
///
/// Lets tests observe the session while a request is in flight.
#[derive(Debug, Clone)]
pub struct GatedReviewTransport {
    response: String,
    requests: Arc<Mutex<Vec<String>>>,
    arrived: Arc<Notify>,
    gate: Arc<Semaphore>,
}

impl GatedReviewTransport {
    /// Creates a gated stub that eventually answers with `review_text`.
    #[must_use]
    pub fn new(review_text: impl Into<String>) -> Self {
        Self {
            response: review_text.into(),
            requests: Arc::default(),
            arrived: Arc::new(Notify::new()),
            gate: Arc::new(Semaphore::new(0)),
        }
    }

    /// Waits until a request reaches the transport.
    pub async fn wait_for_request(&self) {
        self.arrived.notified().await;
    }

    /// Lets one held request complete.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests().len()
    }

    /// Code of every request received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ReviewTransport for GatedReviewTransport {
    async fn fetch_review(&self, request: &ReviewRequest) -> Result<String, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.code().to_owned());
        self.arrived.notify_one();

        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|error| TransportError::Unreachable {
                message: error.to_string(),
            })?;
        Ok(self.response.clone())
    }
}
