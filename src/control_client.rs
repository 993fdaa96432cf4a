//! HTTP client for the Control API.
//!
//! This module provides `ControlClient`, which resolves API paths against a
//! base URL, dispatches requests through an [`HttpTransport`], classifies
//! non-2xx responses and decodes response bodies.
//!
//! # Error Bodies
//!
//! The Control API reports failures as plain text in the response body.
//! Any non-2xx response becomes `ControlError::Api` carrying that text
//! (trimmed), or `HTTP error: <code>` when the body is empty.
//!
//! # Security
//!
//! The access token lives in the transport, never in the client. Neither
//! logs it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Body, Method, Request, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Config, DEFAULT_TIMEOUT_SECS};
use crate::error::{ControlError, Result};
use crate::servers::Servers;
use crate::transport::{HttpTransport, TokenTransport};

/// Default base URL of the Control API.
pub const DEFAULT_BASE_URL: &str = "https://control.vshn.net/";

/// User agent sent with every request, optionally behind a caller prefix.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Control API.
///
/// Configure it (base URL, user agent) before sharing: the setters take
/// `&mut self`, requests only need `&self`. Cloning is cheap and shares the
/// transport.
///
/// # Example
///
/// ```ignore
/// let client = ControlClient::from_token("my-token")?;
///
/// for fqdn in client.servers().list_fqdns("").await? {
///     println!("{}", fqdn);
/// }
/// ```
#[derive(Clone)]
pub struct ControlClient {
    /// Transport used to send requests.
    transport: Arc<dyn HttpTransport>,

    /// Base URL that request paths are resolved against.
    base_url: Url,

    /// Value of the `User-Agent` header.
    user_agent: String,
}

impl ControlClient {
    /// Creates a client that sends requests through `transport`.
    ///
    /// No access token is added unless the transport adds one; see
    /// [`TokenTransport`] and [`ControlClient::from_token`].
    pub fn new(transport: impl HttpTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            base_url: default_base_url(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Creates a client that authenticates with `token` and gives up on a
    /// request after 10 seconds.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::HttpClient` if the HTTP client fails to
    /// initialize, or `ControlError::InvalidHeader` for a malformed token.
    pub fn from_token(token: &str) -> Result<Self> {
        Self::with_timeout(token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client from a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize, the token is
    /// not a valid header value, or the configured base URL does not parse.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::with_timeout(config.token(), config.timeout)?;

        if let Some(base_url) = &config.base_url {
            client.set_base_url(base_url)?;
        }
        if let Some(user_agent) = &config.user_agent {
            client.set_user_agent(user_agent);
        }

        tracing::debug!(
            base_url = %client.base_url,
            timeout_secs = config.timeout.as_secs(),
            "Control API client initialized"
        );

        Ok(client)
    }

    fn with_timeout(token: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ControlError::HttpClient)?;

        Ok(Self::new(TokenTransport::with_transport(token, http)?))
    }

    /// Returns the base URL request paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the current `User-Agent` value.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Replaces the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidUrl` if `new_url` is not an absolute URL
    /// that can serve as a base. The current base URL is kept in that case.
    pub fn set_base_url(&mut self, new_url: &str) -> Result<()> {
        let url = Url::parse(new_url)?;
        if url.cannot_be_a_base() {
            return Err(ControlError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        self.base_url = url;
        Ok(())
    }

    /// Prepends `prefix` to the user agent, giving `<prefix> <current>`.
    ///
    /// The SDK identifier is always kept. Calling this twice prepends twice;
    /// nothing is de-duplicated.
    pub fn set_user_agent(&mut self, prefix: &str) {
        self.user_agent = format!("{} {}", prefix, self.user_agent);
    }

    /// Returns the servers API.
    pub fn servers(&self) -> Servers<'_> {
        Servers::new(self)
    }

    /// Prepares a request with its URL resolved against the base URL and the
    /// `User-Agent` header set.
    ///
    /// `path` is a URL reference: relative paths are joined onto the base
    /// URL, absolute URLs replace it.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::InvalidUrl` if `path` does not parse, or
    /// `ControlError::InvalidHeader` if the user agent is not a valid header
    /// value.
    pub fn build_request(&self, method: Method, path: &str, body: Option<Body>) -> Result<Request> {
        let url = self.base_url.join(path)?;
        let user_agent =
            HeaderValue::from_str(&self.user_agent).map_err(|_| ControlError::InvalidHeader {
                name: "User-Agent",
            })?;

        let mut request = Request::new(method, url);
        request.headers_mut().insert(USER_AGENT, user_agent);
        *request.body_mut() = body;

        Ok(request)
    }

    /// Sends a request and checks the response status.
    ///
    /// On success the response is returned with its body unread.
    ///
    /// # Errors
    ///
    /// - `ControlError::InvalidUrl` / `InvalidHeader` from [`build_request`](Self::build_request)
    /// - `ControlError::Transport` if the request could not be sent
    /// - `ControlError::Api` for any status outside 200-299
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
    ) -> Result<Response> {
        let request = self.build_request(method, path, body)?;

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "Making Control API request"
        );

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(ControlError::Transport)?;

        tracing::trace!(status = %response.status(), "Control API response");

        check_response(response).await
    }

    /// Sends a GET request and returns the body as a list of lines.
    ///
    /// Surrounding whitespace is trimmed before splitting, so leading and
    /// trailing blank lines disappear. Blank lines in between are kept.
    pub async fn get_string_list(&self, path: &str) -> Result<Vec<String>> {
        let response = self.execute(Method::GET, path, None).await?;
        let body = response.text().await.map_err(ControlError::Transport)?;

        Ok(split_lines(&body))
    }

    /// Sends a GET request and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::Decode` if the body is not valid JSON for `T`,
    /// in addition to the errors of [`execute`](Self::execute).
    pub async fn get_json<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(Method::GET, path, None).await?;
        let body = response.bytes().await.map_err(ControlError::Transport)?;

        Ok(serde_json::from_slice(&body)?)
    }
}

impl std::fmt::Debug for ControlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

/// Turns a non-2xx response into `ControlError::Api`, draining its body.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let headers = response.headers().clone();
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();

    let message = if body.is_empty() {
        format!("HTTP error: {}", status.as_u16())
    } else {
        body.to_string()
    };

    Err(ControlError::Api {
        status,
        message,
        url,
        headers,
    })
}

/// Splits a newline-delimited body into its lines.
fn split_lines(body: &str) -> Vec<String> {
    let body = body.trim();
    if body.is_empty() {
        return Vec::new();
    }

    body.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Creates a client for unit tests; nothing here touches the network.
    fn test_client() -> ControlClient {
        ControlClient::new(reqwest::Client::new())
    }

    #[test]
    fn test_default_user_agent() {
        assert_eq!(
            DEFAULT_USER_AGENT,
            format!("control-sdk/{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_build_request_expands_url() {
        let client = test_client();
        let request = client.build_request(Method::GET, "foo/bar", None).unwrap();

        assert_eq!(request.url().as_str(), "https://control.vshn.net/foo/bar");
        assert_eq!(*request.method(), Method::GET);
        assert_eq!(request.headers().get(USER_AGENT).unwrap(), DEFAULT_USER_AGENT);
        assert!(request.body().is_none());
    }

    #[test]
    fn test_build_request_resolves_references() {
        let client = test_client();

        let request = client.build_request(Method::GET, "/api/servers/1/", None).unwrap();
        assert_eq!(request.url().as_str(), "https://control.vshn.net/api/servers/1/");

        let request = client.build_request(Method::GET, "", None).unwrap();
        assert_eq!(request.url().as_str(), "https://control.vshn.net/");

        let request = client
            .build_request(Method::GET, "http://127.0.0.1:1234/other", None)
            .unwrap();
        assert_eq!(request.url().as_str(), "http://127.0.0.1:1234/other");
    }

    #[test]
    fn test_build_request_keeps_method_and_body() {
        let client = test_client();
        let request = client
            .build_request(Method::POST, "api/servers/1/", Some(Body::from("payload")))
            .unwrap();

        assert_eq!(*request.method(), Method::POST);
        assert_eq!(request.body().and_then(Body::as_bytes), Some(&b"payload"[..]));
    }

    #[test]
    fn test_build_request_invalid_url() {
        let client = test_client();
        let err = client.build_request(Method::GET, "http://[::1", None).unwrap_err();
        assert!(matches!(err, ControlError::InvalidUrl(_)));
    }

    #[test]
    fn test_build_request_invalid_user_agent() {
        let mut client = test_client();
        client.set_user_agent("bad\nagent");

        let err = client.build_request(Method::GET, "foo", None).unwrap_err();
        assert!(matches!(err, ControlError::InvalidHeader { name: "User-Agent" }));
    }

    #[test]
    fn test_set_base_url() {
        let mut client = test_client();
        assert_eq!(client.base_url().as_str(), "https://control.vshn.net/");

        let err = client.set_base_url(":").unwrap_err();
        assert!(matches!(err, ControlError::InvalidUrl(_)));
        assert_eq!(client.base_url().as_str(), "https://control.vshn.net/");

        client.set_base_url("http://127.0.0.1:1234/").unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:1234/");

        let request = client.build_request(Method::GET, "foo/bar", None).unwrap();
        assert_eq!(request.url().as_str(), "http://127.0.0.1:1234/foo/bar");
    }

    #[test]
    fn test_set_base_url_rejects_non_base() {
        let mut client = test_client();
        assert!(client.set_base_url("mailto:ops@example.com").is_err());
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_set_user_agent() {
        let mut client = test_client();
        assert_eq!(client.user_agent(), DEFAULT_USER_AGENT);

        client.set_user_agent("myapp/12");
        assert_eq!(client.user_agent(), format!("myapp/12 {}", DEFAULT_USER_AGENT));

        let request = client.build_request(Method::GET, "foo", None).unwrap();
        assert_eq!(
            request.headers().get(USER_AGENT).unwrap().to_str().unwrap(),
            format!("myapp/12 {}", DEFAULT_USER_AGENT)
        );
    }

    #[test]
    fn test_set_user_agent_twice_prepends_twice() {
        let mut client = test_client();
        client.set_user_agent("x");
        client.set_user_agent("x");
        assert_eq!(client.user_agent(), format!("x x {}", DEFAULT_USER_AGENT));
    }

    #[test]
    fn test_split_lines_trailing_blank_lines() {
        assert_eq!(split_lines("foo\nbar\nbaz\n\n"), vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn test_split_lines_leading_blank_line() {
        assert_eq!(
            split_lines("\ndb0.qq1soft.com\ndb1.qq1soft.com\njira.dev.qq1soft.com\n\n"),
            vec!["db0.qq1soft.com", "db1.qq1soft.com", "jira.dev.qq1soft.com"]
        );
    }

    #[test]
    fn test_split_lines_keeps_internal_blank_lines() {
        assert_eq!(split_lines("foo\n\nbar\n"), vec!["foo", "", "bar"]);
    }

    #[test]
    fn test_split_lines_empty_body() {
        assert!(split_lines("").is_empty());
        assert!(split_lines(" \n\n").is_empty());
    }

    #[test]
    fn test_debug_output() {
        let debug = format!("{:?}", test_client());
        assert!(debug.contains("https://control.vshn.net/"));
        assert!(debug.contains(DEFAULT_USER_AGENT));
    }
}
