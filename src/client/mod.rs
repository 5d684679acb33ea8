//! Editor/viewer side of the review pipeline.
//!
//! [`ReviewSession`] owns the code buffer, the latest review text and the
//! request lifecycle. [`ReviewClient`] drives one request through a
//! [`ReviewTransport`], so the state machine can be exercised without a
//! network or a rendering layer.

mod driver;
mod error;
mod session;
mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use driver::ReviewClient;
pub use error::{SubmitError, TransportError};
pub use session::{
    DEFAULT_SAMPLE_CODE, ERROR_PREFIX, RequestState, ReviewRequest, ReviewSession, ReviewView,
};
pub use transport::{HttpReviewTransport, ReviewTransport};
