//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{FmpError, Result};

/// Base URL for the FMP v3 API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Environment variable holding the FMP API key.
const API_KEY_VAR: &str = "FMP_API_KEY";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for an [`FmpClient`](crate::FmpClient).
///
/// The credential is passed in explicitly; nothing reads the environment
/// unless the caller opts in with [`FmpConfig::from_env`].
#[derive(Clone)]
pub struct FmpConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl FmpConfig {
    /// Create a configuration with the default base URL and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: FMP_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the API key from the `FMP_API_KEY` environment variable.
    ///
    /// # Errors
    /// Returns `FmpError::Config` if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(FmpError::Config(format!("{API_KEY_VAR} is not set"))),
        }
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The base URL statement and list endpoints are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for FmpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmpConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FmpConfig::new("test_key");
        assert_eq!(config.api_key(), "test_key");
        assert_eq!(config.base_url(), "https://financialmodelingprep.com/api/v3");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = FmpConfig::new("test_key")
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = FmpConfig::new("secret_key_12345");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("secret_key_12345"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
