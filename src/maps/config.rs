use std::sync::Arc;
use std::time::Duration;

use super::client::{MapsClient, ReqwestTransport};
use super::MapsError;

/// Environment variable holding the Google Maps API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Base URL of the Google Maps web services.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";

/// Configuration for a [`MapsClient`].
#[derive(Clone, Default)]
pub struct MapsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: Option<String>,
    /// Environment variable read on every call when `api_key` is unset
    pub api_key_env: Option<String>,
    /// Base URL the endpoint paths are appended to
    pub base_url: Option<String>,
    /// Optional request timeout; reqwest's default applies when unset
    pub timeout: Option<Duration>,
}

impl MapsConfig {
    /// Takes the API key from `GOOGLE_MAPS_API_KEY` at call time.
    pub fn from_env() -> Self {
        Self {
            api_key_env: Some(API_KEY_ENV.to_string()),
            ..Self::default()
        }
    }

    /// Resolves the API key, treating an empty value as missing.
    ///
    /// An explicit key wins; otherwise the environment is read now, so a
    /// variable set after the client was built is picked up.
    pub fn api_key(&self) -> Result<String, MapsError> {
        let key = match &self.api_key {
            Some(key) => Some(key.clone()),
            None => self
                .api_key_env
                .as_deref()
                .and_then(|name| std::env::var(name).ok()),
        };
        key.filter(|key| !key.is_empty())
            .ok_or(MapsError::MissingApiKey)
    }

    /// Returns the base URL with exactly one trailing slash.
    pub fn base_url(&self) -> String {
        let base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/", base.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A builder for creating maps clients.
#[derive(Debug, Default)]
pub struct MapsClientBuilder {
    api_key: Option<String>,
    api_key_env: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl MapsClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Reads the key from another environment variable.
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = Some(name.into());
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves the configuration.
    ///
    /// Without an explicit key the environment is consulted on each call, and
    /// a missing key is reported by the call rather than here.
    pub fn config(self) -> MapsConfig {
        MapsConfig {
            api_key: self.api_key,
            api_key_env: Some(
                self.api_key_env
                    .unwrap_or_else(|| API_KEY_ENV.to_string()),
            ),
            base_url: self.base_url,
            timeout: self.timeout,
        }
    }

    /// Creates a client backed by reqwest.
    pub fn build(self) -> Result<MapsClient, MapsError> {
        let config = self.config();
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(MapsClient::with_transport(config, Arc::new(transport)))
    }
}
