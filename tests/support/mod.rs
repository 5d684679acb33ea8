//! Shared test utilities.

pub mod runtime;

use std::io;
use std::sync::Arc;

use critique::{CodeReviewService, ServerState, build_router};
use tokio::net::TcpListener;

/// Starts the review endpoint on an ephemeral loopback port.
///
/// The server runs on the current runtime until that runtime shuts down.
/// Returns the base URL to hand to a review transport.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn spawn_review_endpoint(reviewer: Arc<dyn CodeReviewService>) -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let router = build_router(ServerState::new(reviewer), None);

    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok(format!("http://{address}"))
}
