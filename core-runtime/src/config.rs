//! # Client Configuration Module
//!
//! Configuration for the catalog client.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`ClientConfig`] holding the backend base URL and the transport
//! timeout. It enforces fail-fast validation so a malformed base URL is
//! rejected at construction rather than on the first request.
//!
//! The base URL is the single external configuration surface: it comes
//! from the `CATALOG_API_URL` environment variable when present and
//! defaults to `http://localhost:3000` otherwise.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .base_url("http://localhost:3000")
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

/// Default backend location when no environment override is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "CATALOG_API_URL";

/// Configuration for the catalog client.
///
/// Use [`ClientConfig::builder`] or [`ClientConfig::from_env`] to
/// construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without a trailing slash
    pub base_url: String,

    /// Transport-level request timeout. The translator itself imposes
    /// no timeout; this is handed to the transport at wiring time.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Builds a configuration from the environment: `CATALOG_API_URL`
    /// when set and non-empty, the documented default otherwise.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::builder().base_url(base_url).build()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("Base URL cannot be empty".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "Base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`ClientConfig`] instances.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Sets the backend base URL. A trailing slash is stripped so path
    /// concatenation stays predictable.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// Sets the transport timeout.
    ///
    /// Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the final `ClientConfig`, validating every field.
    pub fn build(self) -> Result<ClientConfig> {
        let config = ClientConfig {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
        };

        config.validate()?;

        Ok(config)
    }
}
