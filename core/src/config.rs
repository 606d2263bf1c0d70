//! Client configuration.
//!
//! A `ClientConfig` carries the API base URL and any headers the host wants
//! stamped on every request, such as a user agent. Authentication headers
//! belong to the host transport.

use crate::error::ApiError;

/// Environment variable holding the API base URL, e.g. `https://org.example.com/api/v1`.
pub const BASE_URL_ENV: &str = "POLICY_API_BASE_URL";
/// Optional environment variable for the `user-agent` header.
pub const USER_AGENT_ENV: &str = "POLICY_API_USER_AGENT";

const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: Vec::new(),
        }
    }

    /// Configuration for an organization root URL; appends the `/api/v1` prefix.
    pub fn for_org(org_url: &str) -> Self {
        Self::new(format!("{}{API_PREFIX}", org_url.trim_end_matches('/')))
    }

    /// Read configuration from `POLICY_API_BASE_URL` and `POLICY_API_USER_AGENT`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApiError::Configuration(format!("{BASE_URL_ENV} is not set")))?;
        let mut config = Self::new(base_url.trim());
        if let Some(agent) = lookup(USER_AGENT_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_header("user-agent", agent.trim());
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Reject base URLs that are not absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = self.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApiError::Configuration(format!(
                "base url must start with http:// or https://, got {url:?}"
            )));
        }
        Ok(())
    }
}
