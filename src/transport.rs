//! Request-executing transports.
//!
//! [`HttpTransport`] is the seam between [`ControlClient`](crate::control_client::ControlClient)
//! and the network. It is implemented for `reqwest::Client` and for
//! [`TokenTransport`], a decorator that authenticates every request it
//! forwards with the Control API access token.
//!
//! # Security
//!
//! The token is stored as a sensitive header value and redacted from
//! `Debug` output. It is never logged.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Request, Response};

use crate::error::ControlError;

/// Name of the header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-AccessToken";

/// Something that can send a prepared HTTP request.
///
/// Implementations must not retry and must return transport failures
/// unchanged; status handling happens in the client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the raw response.
    async fn execute(&self, request: Request) -> reqwest::Result<Response>;
}

#[async_trait]
impl HttpTransport for reqwest::Client {
    async fn execute(&self, request: Request) -> reqwest::Result<Response> {
        reqwest::Client::execute(self, request).await
    }
}

/// Transport decorator that injects the `X-AccessToken` header.
///
/// # Example
///
/// ```ignore
/// let transport = TokenTransport::new("my-token")?;
/// let client = ControlClient::new(transport);
/// ```
pub struct TokenTransport<T = reqwest::Client> {
    token: HeaderValue,
    inner: T,
}

impl TokenTransport<reqwest::Client> {
    /// Creates a token transport over a default `reqwest::Client`.
    ///
    /// The default client has no overall timeout; use
    /// [`ControlClient::from_token`](crate::control_client::ControlClient::from_token)
    /// for one with the standard 10 second limit.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidHeader` if the token contains characters
    /// that are not allowed in a header value.
    pub fn new(token: &str) -> Result<Self, ControlError> {
        Self::with_transport(token, reqwest::Client::new())
    }
}

impl<T: HttpTransport> TokenTransport<T> {
    /// Wraps an existing transport.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidHeader` if the token contains characters
    /// that are not allowed in a header value.
    pub fn with_transport(token: &str, inner: T) -> Result<Self, ControlError> {
        let mut token = HeaderValue::from_str(token).map_err(|_| ControlError::InvalidHeader {
            name: ACCESS_TOKEN_HEADER,
        })?;
        token.set_sensitive(true);

        Ok(Self { token, inner })
    }

    /// Returns the wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: HttpTransport> HttpTransport for TokenTransport<T> {
    async fn execute(&self, mut request: Request) -> reqwest::Result<Response> {
        // The request is owned here; whatever the caller kept is untouched.
        request.headers_mut().insert(
            HeaderName::from_static("x-accesstoken"),
            self.token.clone(),
        );
        self.inner.execute(request).await
    }
}

impl<T> fmt::Debug for TokenTransport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenTransport")
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
