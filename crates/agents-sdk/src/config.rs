//! Client configuration.

use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Configuration for the agent platform client.
///
/// Constructed per client, explicit about every knob; the SDK never reads the
/// process environment. Environment fallbacks belong to the caller (the CLI
/// wires them through flag defaults).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the platform API.
    pub(crate) base_url: String,
    /// API token for bearer authentication.
    pub(crate) api_token: Option<Secret<String>>,
    /// Deployment to target; `None` selects the shared gateway.
    pub(crate) deployment_id: Option<String>,
    /// Request timeout duration.
    pub(crate) timeout: Duration,
    /// Connection timeout duration.
    pub(crate) connect_timeout: Duration,
    /// Delay between status polls.
    pub(crate) poll_interval: Duration,
    /// Overall limit on how long to poll a job; `None` waits indefinitely.
    pub(crate) poll_deadline: Option<Duration>,
    /// User agent string.
    pub(crate) user_agent: String,
}

impl ClientConfig {
    /// Default request timeout (90 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);
    /// Default connection timeout (10 seconds).
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default delay between status polls (1 second).
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
    /// Default user agent.
    pub const DEFAULT_USER_AGENT: &'static str =
        concat!("agents-sdk-rust/", env!("CARGO_PKG_VERSION"));

    /// Create a new configuration with default values.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            deployment_id: None,
            timeout: Self::DEFAULT_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            poll_deadline: None,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if an API token is configured.
    pub fn has_api_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// Get the API token (exposed for use in request headers).
    pub(crate) fn api_token_value(&self) -> Option<&str> {
        self.api_token.as_ref().map(|s| s.expose_secret().as_str())
    }

    /// Get the deployment ID.
    pub fn deployment_id(&self) -> Option<&str> {
        self.deployment_id.as_deref()
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the connection timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Get the poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Get the poll deadline, if any.
    pub fn poll_deadline(&self) -> Option<Duration> {
        self.poll_deadline
    }

    /// Get the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("https://example.com");
        assert_eq!(config.base_url(), "https://example.com");
        assert!(!config.has_api_token());
        assert!(config.deployment_id().is_none());
        assert_eq!(config.timeout(), ClientConfig::DEFAULT_TIMEOUT);
        assert_eq!(config.poll_interval(), ClientConfig::DEFAULT_POLL_INTERVAL);
        assert!(config.poll_deadline().is_none());
    }
}
