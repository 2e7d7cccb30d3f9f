//! Configuration for the Unusual Whales API adapter

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use uw_utils::{Env, EnvError};

/// Environment variable holding the API token
pub const API_TOKEN_VAR: &str = "UNUSUAL_WHALES_API_TOKEN";

/// Environment variable overriding the API base URL
pub const BASE_URL_VAR: &str = "UNUSUAL_WHALES_BASE_URL";

/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_VAR: &str = "UNUSUAL_WHALES_TIMEOUT_SECS";

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.unusualwhales.com";

/// Default HTTP I/O timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const BEARER_PREFIX: &str = "Bearer ";

/// Errors raised while loading or validating [`ApiConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("API token must not be empty")]
    EmptyToken,

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Request timeout must be greater than 0")]
    ZeroTimeout,
}

/// Adapter configuration
///
/// Read once at startup and passed by reference into
/// [`UnusualWhalesClient::new`](crate::UnusualWhalesClient::new). The token
/// is never exposed through `Debug`.
#[derive(Clone)]
pub struct ApiConfig {
    api_token: String,

    /// Base URL every endpoint path is joined onto
    pub base_url: Url,

    /// HTTP I/O timeout for a single request
    pub request_timeout: Duration,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ApiConfig {
    /// Create a new configuration builder
    pub fn builder(api_token: impl Into<String>) -> ApiConfigBuilder {
        ApiConfigBuilder::new(api_token)
    }

    /// Load configuration from the process environment
    ///
    /// A missing `UNUSUAL_WHALES_API_TOKEN` is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_source(&Env::process())
    }

    /// Load configuration through an arbitrary variable source
    pub fn from_env_source<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        ApiConfigBuilder::from_env_source(env)?.build()
    }

    /// Value of the `Authorization` header
    ///
    /// Tokens that already carry the scheme, in any case, keep a single
    /// `Bearer ` prefix.
    pub fn authorization(&self) -> String {
        let token = self.api_token.as_str();
        let credentials = match token.get(..BEARER_PREFIX.len()) {
            Some(scheme) if scheme.eq_ignore_ascii_case(BEARER_PREFIX) => {
                &token[BEARER_PREFIX.len()..]
            }
            _ => token,
        };
        format!("{BEARER_PREFIX}{credentials}")
    }
}

/// Builder for [`ApiConfig`]
#[derive(Debug)]
pub struct ApiConfigBuilder {
    api_token: String,
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiConfigBuilder {
    fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: None,
            request_timeout: None,
            user_agent: None,
        }
    }

    /// Builder seeded from the process environment
    ///
    /// Lets callers apply overrides (e.g. command-line flags) before building.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_source(&Env::process())
    }

    /// Builder seeded through an arbitrary variable source
    pub fn from_env_source<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::new(env.required(API_TOKEN_VAR)?);

        if let Some(url) = env.optional(BASE_URL_VAR) {
            builder = builder.base_url(url);
        }
        if let Some(secs) = env.parsed::<u64>(TIMEOUT_VAR)? {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        Ok(builder)
    }

    /// Override the API base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let api_token = self.api_token.trim().to_string();
        if api_token.is_empty() || api_token == BEARER_PREFIX.trim_end() {
            return Err(ConfigError::EmptyToken);
        }

        let raw_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw_url,
                reason: "scheme must be http or https".to_string(),
            });
        }

        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(ApiConfig {
            api_token,
            base_url,
            request_timeout,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| concat!("uw-mcp/", env!("CARGO_PKG_VERSION")).to_string()),
        })
    }
}
