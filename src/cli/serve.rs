//! Serve mode: run the review endpoint until Ctrl-C.

use std::future::Future;
use std::sync::Arc;

use axum::http::HeaderValue;
use critique::{CritiqueConfig, OpenAiCodeReviewService, REVIEW_ROUTE, ServerState, build_router};
use tokio::net::TcpListener;

use super::error::CliError;

/// Runs the review endpoint with the configured provider.
///
/// A missing provider key does not prevent start-up; requests then fail
/// with a generic server error.
///
/// # Errors
///
/// Returns [`CliError::Configuration`] for invalid settings and
/// [`CliError::Server`] when the listener cannot be bound or serving fails.
pub async fn run(config: &CritiqueConfig) -> Result<(), CliError> {
    let address = config.socket_addr()?;
    let allowed_origin = config.allowed_origin_header()?;
    let reviewer = OpenAiCodeReviewService::new(config.code_review_config()?).map_err(|error| {
        CliError::Configuration {
            message: error.to_string(),
        }
    })?;
    if config.resolve_ai_api_key().is_none() {
        tracing::warn!("no AI API key configured; review requests will fail");
    }

    let listener = TcpListener::bind(address)
        .await
        .map_err(|error| CliError::Server {
            message: format!("failed to bind {address}: {error}"),
        })?;

    serve_on(
        listener,
        ServerState::new(Arc::new(reviewer)),
        allowed_origin,
        shutdown_signal(),
    )
    .await
}

/// Serves the router on `listener` until `shutdown` completes.
///
/// In-flight requests are allowed to finish before returning.
///
/// # Errors
///
/// Returns [`CliError::Server`] when the listener fails.
pub async fn serve_on(
    listener: TcpListener,
    state: ServerState,
    allowed_origin: Option<HeaderValue>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), CliError> {
    let local_address = listener.local_addr().map_err(|error| CliError::Server {
        message: error.to_string(),
    })?;
    tracing::info!(address = %local_address, route = REVIEW_ROUTE, "review endpoint listening");

    axum::serve(listener, build_router(state, allowed_origin))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|error| CliError::Server {
            message: error.to_string(),
        })?;

    tracing::info!("review endpoint stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
}
