//! Client configuration.

use url::Url;

use crate::error::{CostApiError, Result};

/// Environment variable holding the cost API base URL.
pub const BASE_URL_ENV: &str = "COST_API_BASE_URL";
/// Environment variable holding the auth (token) endpoint URL.
pub const AUTH_URL_ENV: &str = "COST_API_AUTH_URL";
/// Optional environment variable overriding the HTTP user agent.
pub const USER_AGENT_ENV: &str = "COST_API_USER_AGENT";

const DEFAULT_USER_AGENT: &str = concat!("cluster-cost/", env!("CARGO_PKG_VERSION"));

/// Endpoints and HTTP settings for [`CostApiClient`](crate::CostApiClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostApiConfig {
    base_url: String,
    auth_url: String,
    user_agent: String,
}

impl CostApiConfig {
    /// Create a configuration from a cost API base URL and an auth URL.
    ///
    /// A trailing `/` on the base URL is dropped so endpoint paths can be
    /// appended directly.
    ///
    /// # Errors
    ///
    /// Returns [`CostApiError::Config`] if either URL is not an absolute
    /// `http`/`https` URL.
    pub fn new(base_url: impl Into<String>, auth_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let auth_url = auth_url.into();

        validate_url("base URL", &base_url)?;
        validate_url("auth URL", &auth_url)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Load configuration from `COST_API_BASE_URL`, `COST_API_AUTH_URL` and
    /// optionally `COST_API_USER_AGENT`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is unset or holds an invalid URL.
    pub fn from_env() -> Result<Self> {
        let base_url = require_env(BASE_URL_ENV)?;
        let auth_url = require_env(AUTH_URL_ENV)?;
        let config = Self::new(base_url, auth_url)?;

        match std::env::var(USER_AGENT_ENV) {
            Ok(agent) if !agent.trim().is_empty() => Ok(config.with_user_agent(agent)),
            _ => Ok(config),
        }
    }

    /// Override the user agent sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Base URL of the cost API, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the token endpoint.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Full URL for an endpoint path such as `/cloudCost`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| CostApiError::Config(format!("{name} environment variable not set")))
}

fn validate_url(what: &str, raw: &str) -> Result<()> {
    let parsed =
        Url::parse(raw).map_err(|e| CostApiError::Config(format!("invalid {what} '{raw}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CostApiError::Config(format!(
            "{what} must use http or https, got '{other}'"
        ))),
    }
}
