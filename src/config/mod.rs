//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.critique.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `CRITIQUE_*`, plus the conventional
//!    `OPENAI_API_KEY` as a fallback for the provider key
//! 4. **Command-line arguments** – `--serve`/`-s`, `--port`/`-p`,
//!    `--endpoint-url`/`-e`, `--code-file`/`-f`, `--output`/`-o`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! bind = "0.0.0.0"
//! port = 3000
//! allowed_origin = "http://localhost:5173"
//! ai_base_url = "https://api.openai.com/v1"
//! ai_model = "gpt-4o-mini"
//! ai_timeout_seconds = 60
//! endpoint_url = "http://localhost:3000"
//! log_filter = "critique=debug,tower_http=info"
//! ```

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::http::HeaderValue;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::ai::OpenAiCodeReviewConfig;

const DEFAULT_BIND: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_AI_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_ENDPOINT_URL: &str = "http://localhost:3000";
const DEFAULT_LOG_FILTER: &str = "info";

/// Environment variable consulted when no provider key is configured.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Operation mode determined by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Run the review endpoint over HTTP.
    Serve,
    /// Submit a code buffer to an endpoint and print the rendered review.
    Review,
}

/// Invalid configuration values detected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The listen address is not an IP address.
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddress {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The review endpoint is not an absolute HTTP(S) URL.
    #[error("invalid endpoint URL '{value}': {message}")]
    InvalidEndpointUrl {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The provider timeout is zero.
    #[error("invalid AI timeout '{value}': must be at least one second")]
    InvalidTimeout {
        /// Configured value.
        value: u64,
    },
    /// The CORS origin cannot be sent as a header value.
    #[error("invalid allowed origin '{value}': {message}")]
    InvalidAllowedOrigin {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `CRITIQUE_BIND` / `CRITIQUE_PORT`: listen address in serve mode
/// - `CRITIQUE_ALLOWED_ORIGIN`: CORS origin allowed to call the endpoint
/// - `CRITIQUE_AI_BASE_URL`, `CRITIQUE_AI_MODEL`: provider settings
/// - `CRITIQUE_AI_API_KEY` or `OPENAI_API_KEY`: provider key
/// - `CRITIQUE_ENDPOINT_URL`: review endpoint used in review mode
///
/// # Example
///
/// ```no_run
/// use critique::CritiqueConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = CritiqueConfig::load().expect("failed to load configuration");
/// let address = config.socket_addr().expect("bind address should parse");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "CRITIQUE",
    discovery(
        dotfile_name = ".critique.toml",
        config_file_name = "critique.toml",
        app_name = "critique"
    )
)]
pub struct CritiqueConfig {
    /// Runs the review endpoint instead of submitting a review.
    ///
    /// Can be provided via:
    /// - CLI: `--serve` / `-s`
    /// - Config file: `serve = true`
    ///
    /// Note: `CRITIQUE_SERVE` is not read because `ortho_config` does not
    /// load boolean values from the environment.
    #[ortho_config(cli_short = 's')]
    pub serve: bool,

    /// IP address the endpoint listens on.
    #[ortho_config(cli_short = 'b')]
    pub bind: String,

    /// TCP port the endpoint listens on.
    ///
    /// Can be provided via:
    /// - CLI: `--port <PORT>` or `-p <PORT>`
    /// - Environment: `CRITIQUE_PORT`
    /// - Config file: `port = 3000`
    #[ortho_config(cli_short = 'p')]
    pub port: u16,

    /// Origin allowed by CORS. Any origin is allowed when unset.
    #[ortho_config(cli_short = 'a')]
    pub allowed_origin: Option<String>,

    /// Base URL of the OpenAI-compatible provider.
    #[ortho_config(cli_short = 'B')]
    pub ai_base_url: String,

    /// Model identifier sent to the provider.
    #[ortho_config(cli_short = 'm')]
    pub ai_model: String,

    /// Provider API key.
    ///
    /// Can be provided via:
    /// - CLI: `--ai-api-key <KEY>`
    /// - Environment: `CRITIQUE_AI_API_KEY` or `OPENAI_API_KEY`
    /// - Config file: `ai_api_key = "..."`
    #[ortho_config(cli_short = 'k')]
    pub ai_api_key: Option<String>,

    /// Timeout for one provider call, in seconds.
    #[ortho_config(cli_short = 't')]
    pub ai_timeout_seconds: u64,

    /// Base URL of the review endpoint used in review mode.
    ///
    /// Can be provided via:
    /// - CLI: `--endpoint-url <URL>` or `-e <URL>`
    /// - Environment: `CRITIQUE_ENDPOINT_URL`
    /// - Config file: `endpoint_url = "..."`
    #[ortho_config(cli_short = 'e')]
    pub endpoint_url: String,

    /// File holding the code to review; `-` reads standard input.
    ///
    /// The built-in sample is reviewed when unset.
    #[ortho_config(cli_short = 'f')]
    pub code_file: Option<String>,

    /// File receiving the rendered review; standard output when unset.
    #[ortho_config(cli_short = 'o')]
    pub output: Option<String>,

    /// Tracing filter used when `RUST_LOG` is not set.
    #[ortho_config(cli_short = 'l')]
    pub log_filter: String,
}

impl Default for CritiqueConfig {
    fn default() -> Self {
        Self {
            serve: false,
            bind: DEFAULT_BIND.to_owned(),
            port: DEFAULT_PORT,
            allowed_origin: None,
            ai_base_url: DEFAULT_AI_BASE_URL.to_owned(),
            ai_model: DEFAULT_AI_MODEL.to_owned(),
            ai_api_key: None,
            ai_timeout_seconds: DEFAULT_AI_TIMEOUT_SECONDS,
            endpoint_url: DEFAULT_ENDPOINT_URL.to_owned(),
            code_file: None,
            output: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl CritiqueConfig {
    /// Determines the operation mode.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.serve {
            OperationMode::Serve
        } else {
            OperationMode::Review
        }
    }

    /// Resolves the provider key from configuration or `OPENAI_API_KEY`.
    ///
    /// Blank values count as absent.
    #[must_use]
    pub fn resolve_ai_api_key(&self) -> Option<String> {
        let present = |key: &String| !key.trim().is_empty();
        self.ai_api_key
            .clone()
            .filter(present)
            .or_else(|| env::var(OPENAI_API_KEY_ENV).ok().filter(present))
    }

    /// Provider timeout as a [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] when `ai_timeout_seconds` is
    /// zero.
    pub const fn ai_timeout(&self) -> Result<Duration, ConfigError> {
        match self.ai_timeout_seconds {
            0 => Err(ConfigError::InvalidTimeout { value: 0 }),
            seconds => Ok(Duration::from_secs(seconds)),
        }
    }

    /// Builds the provider adapter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] for a zero provider timeout.
    pub fn code_review_config(&self) -> Result<OpenAiCodeReviewConfig, ConfigError> {
        Ok(OpenAiCodeReviewConfig::new(
            self.ai_base_url.clone(),
            self.ai_model.clone(),
            self.resolve_ai_api_key(),
            self.ai_timeout()?,
        ))
    }

    /// Socket address the endpoint listens on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddress`] when `bind` is not an IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .bind
            .trim()
            .parse::<IpAddr>()
            .map_err(|error| ConfigError::InvalidBindAddress {
                value: self.bind.clone(),
                message: error.to_string(),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// CORS origin as a header value, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAllowedOrigin`] when the origin holds
    /// characters not permitted in a header.
    pub fn allowed_origin_header(&self) -> Result<Option<HeaderValue>, ConfigError> {
        self.allowed_origin
            .as_deref()
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|error| {
                    ConfigError::InvalidAllowedOrigin {
                        value: origin.to_owned(),
                        message: error.to_string(),
                    }
                })
            })
            .transpose()
    }

    /// Validated base URL of the review endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] when `endpoint_url` does
    /// not parse or does not use `http` or `https`.
    pub fn endpoint_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.endpoint_url.trim()).map_err(|error| {
            ConfigError::InvalidEndpointUrl {
                value: self.endpoint_url.clone(),
                message: error.to_string(),
            }
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidEndpointUrl {
                value: self.endpoint_url.clone(),
                message: format!("unsupported scheme '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests;
