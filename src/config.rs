//! Client configuration for talking to the dataset server.

use std::time::Duration;

use crate::error::{GalleryError, Result};

/// Default server address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8675";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_URL: &str = "DSGALLERY_URL";
const ENV_TIMEOUT: &str = "DSGALLERY_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server root, without a trailing slash.
    pub base_url: String,
    /// Timeout applied to every request.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `DSGALLERY_URL` and `DSGALLERY_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_URL) {
            config = config.with_base_url(&url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| GalleryError::Config(format!("{ENV_TIMEOUT} is not a number: {raw:?}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(GalleryError::Config("base URL is empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(GalleryError::Config(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(GalleryError::Config("request timeout must be non-zero".into()));
        }
        Ok(())
    }

    /// Absolute URL for an endpoint path such as `/api/img/delete`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
