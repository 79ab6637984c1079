//! Immutable client configuration.

use std::time::Duration;

use secrecy::SecretString;

use condensate_types::{Settings, DEFAULT_TIMEOUT_SECS};

/// Connection settings for a [`crate::CondensateClient`].
///
/// Built once and never mutated afterwards; the client only reads it while
/// constructing its transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    api_key: Option<SecretString>,
    timeout: Duration,
}

impl ClientConfig {
    /// Configuration for `base_url` with no credential and the default timeout.
    ///
    /// Trailing slashes are trimmed so paths can be appended directly.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the bearer credential. An empty key leaves the client unauthenticated.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.is_empty() {
            None
        } else {
            Some(SecretString::from(api_key))
        };
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from loaded [`Settings`].
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.url.clone())
            .with_api_key(settings.api_key.clone())
            .with_timeout(settings.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
