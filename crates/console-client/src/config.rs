//! Client configuration for the router console.

use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use url::Url;

/// Configuration for the router client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the router gateway.
    pub(crate) base_url: Url,
    /// API key for authentication, if the gateway requires one.
    pub(crate) api_key: Option<Secret<String>>,
    /// Request timeout duration.
    pub(crate) timeout: Duration,
    /// Connection timeout duration.
    pub(crate) connect_timeout: Duration,
    /// User agent string.
    pub(crate) user_agent: String,
}

impl ClientConfig {
    /// Default request timeout (120 seconds; completions can be slow).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
    /// Default connection timeout (10 seconds).
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default user agent.
    pub const DEFAULT_USER_AGENT: &'static str =
        concat!("router-console-rust/", env!("CARGO_PKG_VERSION"));

    /// Create a new configuration with default values.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: Self::DEFAULT_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get the API key (exposed for use in requests).
    pub(crate) fn api_key_value(&self) -> Option<&str> {
        self.api_key.as_ref().map(|s| s.expose_secret().as_str())
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the connection timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Get the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Url::parse("http://localhost:8000").expect("valid default URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert!(!config.has_api_key());
        assert_eq!(config.timeout(), ClientConfig::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_config_with_custom_url() {
        let url = Url::parse("https://router.example.com").unwrap();
        let config = ClientConfig::new(url.clone());
        assert_eq!(config.base_url(), &url);
    }
}
