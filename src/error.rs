//! Error types for the Control API SDK.
//!
//! This module defines `ControlError`, the single error type returned by
//! every fallible operation in the crate.
//!
//! # Security
//!
//! The access token never appears in any variant. Header validation errors
//! name the offending header, not its value.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Result type for Control API operations.
pub type Result<T> = std::result::Result<T, ControlError>;

/// Unified error type for all Control API operations.
#[derive(Error, Debug)]
pub enum ControlError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// A base URL or request path could not be parsed as a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value (access token or user agent) contains characters that
    /// are not allowed in HTTP headers.
    #[error("invalid value for header {name}")]
    InvalidHeader {
        /// Name of the header that could not be set.
        name: &'static str,
    },

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The request could not be sent or the response body could not be read
    /// (DNS failure, connection refused, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-2xx status.
    ///
    /// The message is the trimmed response body, or `HTTP error: <code>` when
    /// the body was empty.
    #[error("{message}")]
    Api {
        /// The HTTP status code returned.
        status: StatusCode,
        /// Error text as sent by the API.
        message: String,
        /// Final URL of the failed request.
        url: Url,
        /// Response headers.
        headers: HeaderMap,
    },

    /// The response body was not valid JSON for the expected type.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ControlError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        ControlError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ControlError::Config(message.into())
    }

    /// Returns the HTTP status for API errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ControlError::Api { status, .. } => Some(*status),
            ControlError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Returns true if the API answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns true if the API rejected the access token (401 or 403).
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }

    /// Returns true if the transport gave up waiting for the server.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ControlError::Transport(e) if e.is_timeout())
    }
}
