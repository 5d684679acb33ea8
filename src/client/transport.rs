//! Transport port for reaching the review endpoint, with an HTTP adapter.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::server::REVIEW_ROUTE;

use super::error::TransportError;
use super::session::ReviewRequest;

/// Delivers a review request and returns the endpoint's raw text.
#[async_trait]
pub trait ReviewTransport: Send + Sync + std::fmt::Debug {
    /// Sends `request` and waits for the complete response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the endpoint is unreachable, answers
    /// with a non-success status, or the body cannot be read.
    async fn fetch_review(&self, request: &ReviewRequest) -> Result<String, TransportError>;
}

/// Posts review requests as JSON to a running review endpoint.
///
/// No timeout is applied: a request waits until the endpoint answers or the
/// connection fails.
#[derive(Debug, Clone)]
pub struct HttpReviewTransport {
    client: Client,
    endpoint: Url,
}

impl HttpReviewTransport {
    /// Creates a transport for the server rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidEndpoint`] when `base_url` is not an
    /// absolute URL.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base = Url::parse(base_url).map_err(|error| TransportError::InvalidEndpoint {
            message: format!("{base_url}: {error}"),
        })?;
        let endpoint = base
            .join(REVIEW_ROUTE)
            .map_err(|error| TransportError::InvalidEndpoint {
                message: format!("{base_url}: {error}"),
            })?;

        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    /// Fully resolved endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ReviewTransport for HttpReviewTransport {
    async fn fetch_review(&self, request: &ReviewRequest) -> Result<String, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|error| TransportError::Unreachable {
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|error| TransportError::Body {
                message: error.to_string(),
            })
    }
}
