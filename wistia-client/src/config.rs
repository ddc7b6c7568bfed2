//! Wistia client configuration.

use crate::{ClientError, Result};
use std::fmt;
use std::time::Duration;

/// Production Data API root.
pub const DEFAULT_BASE_URL: &str = "https://api.wistia.com/v1/";

/// Environment variable holding the API password.
pub const API_PASSWORD_ENV: &str = "WISTIA_API_PASSWORD";

/// Environment variable overriding the API root.
pub const BASE_URL_ENV: &str = "WISTIA_API_BASE_URL";

/// How the API password is presented.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Bearer <password>`
    #[default]
    Bearer,
    /// HTTP basic auth with the given user (Wistia uses `api`).
    Basic {
        /// Basic auth user name.
        user: String,
    },
}

/// Wistia client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// API password (token).
    pub api_password: String,
    /// Authorization scheme.
    pub auth: AuthScheme,
    /// API root; relative paths are appended to it.
    pub base_url: String,
    /// Default request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_password", &"<redacted>")
            .field("auth", &self.auth)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_password: String::new(),
            auth: AuthScheme::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("wistia-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given API password.
    pub fn new(api_password: impl Into<String>) -> Self {
        Self {
            api_password: api_password.into(),
            ..Self::default()
        }
    }

    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load the API password (and optional base URL) from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_password = lookup(API_PASSWORD_ENV)
            .filter(|p| !p.is_empty())
            .ok_or(ClientError::MissingCredentials)?;

        let mut builder = Self::builder().api_password(api_password);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }
}

/// Builder for Wistia client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API password.
    pub fn api_password(mut self, password: impl Into<String>) -> Self {
        self.config.api_password = password.into();
        self
    }

    /// Use HTTP basic auth instead of a bearer token.
    pub fn basic_auth(mut self, user: impl Into<String>) -> Self {
        self.config.auth = AuthScheme::Basic { user: user.into() };
        self
    }

    /// Set the API root.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    ///
    /// The base URL always ends with `/` so relative paths join cleanly.
    pub fn build(mut self) -> Result<ClientConfig> {
        if self.config.api_password.is_empty() {
            return Err(ClientError::MissingCredentials);
        }
        if !(self.config.base_url.starts_with("http://")
            || self.config.base_url.starts_with("https://"))
        {
            return Err(ClientError::Config(format!(
                "base URL must be http(s): {}",
                self.config.base_url
            )));
        }
        if !self.config.base_url.ends_with('/') {
            self.config.base_url.push('/');
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.wistia.com/v1/");
        assert_eq!(config.auth, AuthScheme::Bearer);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .api_password("token")
            .basic_auth("api")
            .base_url("http://localhost:8080/v1")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/v1/");
        assert_eq!(
            config.auth,
            AuthScheme::Basic {
                user: "api".to_string()
            }
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_requires_password() {
        let result = ClientConfig::builder().build();
        assert!(matches!(result, Err(ClientError::MissingCredentials)));
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let result = ClientConfig::builder()
            .api_password("token")
            .base_url("ftp://example.com")
            .build();
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            (API_PASSWORD_ENV, "secret-token"),
            (BASE_URL_ENV, "http://127.0.0.1:9000/v1/"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api_password, "secret-token");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/v1/");
    }

    #[test]
    fn test_from_lookup_missing_password() {
        let result = ClientConfig::from_lookup(|_| None);
        assert!(matches!(result, Err(ClientError::MissingCredentials)));

        let result = ClientConfig::from_lookup(|_| Some(String::new()));
        assert!(matches!(result, Err(ClientError::MissingCredentials)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientConfig::new("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
