//! Request handler for `POST /ai/get-review`.

use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;

use super::ServerState;
use super::error::ReviewError;

/// Body returned when the payload has no usable code.
pub const CODE_REQUIRED_MESSAGE: &str = "Code is required";

/// Body returned when the provider call fails.
pub const REVIEW_FAILED_MESSAGE: &str = "Failed to process the code review";

/// Incoming review payload.
///
/// `code` is kept as a raw JSON value so that non-string values are reported
/// as validation failures instead of framework decoding errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewPayload {
    /// Source code to review.
    pub code: Option<Value>,
}

impl ReviewPayload {
    /// Parses a request body leniently.
    ///
    /// Bodies that are not a JSON object (including malformed JSON and empty
    /// bodies) yield an empty payload, which then fails validation.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        let code = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(mut fields)) => fields.remove("code"),
            _ => None,
        };
        Self { code }
    }

    /// Returns the code when it is a non-empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Validation`] when `code` is missing, null,
    /// empty, or not a string.
    pub fn require_code(&self) -> Result<&str, ReviewError> {
        match self.code.as_ref() {
            Some(Value::String(code)) if !code.is_empty() => Ok(code.as_str()),
            _ => Err(ReviewError::Validation),
        }
    }
}

pub(super) async fn get_review(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<String, ReviewError> {
    let payload = ReviewPayload::from_body(&body);
    let code = payload.require_code()?;

    match state.reviewer().review_code(code).await {
        Ok(review) => Ok(review),
        Err(error) => {
            tracing::error!(error = %error, "review generation failed");
            Err(ReviewError::Upstream {
                message: error.to_string(),
            })
        }
    }
}
