//! Configuration loading for Control API clients.
//!
//! Reads the access token and optional client settings from environment
//! variables, with validation to catch obvious mistakes early.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::ControlError;

/// Overall request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for building a [`ControlClient`](crate::control_client::ControlClient).
///
/// The access token is stored but never logged; `Debug` output redacts it.
#[derive(Clone)]
pub struct Config {
    /// Base URL override (e.g. `https://control.example.com/`).
    pub base_url: Option<String>,

    /// Optional prefix for the `User-Agent` header.
    pub user_agent: Option<String>,

    /// Overall request timeout.
    pub timeout: Duration,

    /// Control API access token.
    token: String,
}

impl Config {
    /// Creates a configuration with the given token and default settings.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token: token.into(),
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CONTROL_API_TOKEN` (required): access token
    /// - `CONTROL_API_URL`: base URL override
    /// - `CONTROL_USER_AGENT`: user agent prefix
    /// - `CONTROL_TIMEOUT_SECS`: request timeout in seconds (default 10)
    ///
    /// # Errors
    ///
    /// Returns `ControlError::Config` if the token is missing or looks like a
    /// placeholder, or if an optional variable has an invalid value.
    pub fn from_env() -> Result<Self, ControlError> {
        let token = Self::get_required_env("CONTROL_API_TOKEN")?;
        Self::validate_token(&token)?;

        let base_url = Self::get_optional_env("CONTROL_API_URL")
            .map(Self::validate_base_url)
            .transpose()?;
        let user_agent = Self::get_optional_env("CONTROL_USER_AGENT");
        let timeout = match Self::get_optional_env("CONTROL_TIMEOUT_SECS") {
            Some(value) => Self::parse_timeout(&value)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Config {
            base_url,
            user_agent,
            timeout,
            token,
        })
    }

    /// Sets the base URL override.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the user agent prefix.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the access token.
    ///
    /// Hand this to a transport only; never log it.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, ControlError> {
        Self::get_optional_env(name).ok_or_else(|| ControlError::missing_env(name))
    }

    /// Gets an environment variable, treating blank values as unset.
    fn get_optional_env(name: &str) -> Option<String> {
        env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn validate_base_url(url: String) -> Result<String, ControlError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ControlError::invalid_config(
                "CONTROL_API_URL must start with http:// or https://",
            ));
        }

        // Relative API paths are joined onto the base, so keep it a directory.
        if url.ends_with('/') {
            Ok(url)
        } else {
            Ok(format!("{}/", url))
        }
    }

    /// Validates the token is not a placeholder value.
    fn validate_token(token: &str) -> Result<(), ControlError> {
        let token_lower = token.to_lowercase();
        let placeholder_patterns = ["your_token", "your-token", "placeholder", "changeme"];

        if placeholder_patterns
            .iter()
            .any(|pattern| token_lower.contains(pattern))
        {
            return Err(ControlError::invalid_config(
                "CONTROL_API_TOKEN appears to be a placeholder value",
            ));
        }

        Ok(())
    }

    fn parse_timeout(value: &str) -> Result<Duration, ControlError> {
        match value.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ControlError::invalid_config(
                "CONTROL_TIMEOUT_SECS must be a positive number of seconds",
            )),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
