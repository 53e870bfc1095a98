//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Fixed timeout after which a remote call is treated as failed
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default directory for the local check-in cache
pub const DEFAULT_CACHE_DIR: &str = ".kiosk";

/// Client configuration for the check-in service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Remote endpoint URL. `None` means every remote call is treated as
    /// unavailable and the client works from the local cache only.
    pub endpoint_url: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// Directory holding the local cache file
    pub cache_dir: PathBuf,

    /// Use the combined guest + table status action instead of two calls
    pub prefer_combined_status: bool,
}

impl ClientConfig {
    /// Create a configuration that talks to the given endpoint
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            ..Self::offline()
        }
    }

    /// Create a configuration with no remote endpoint
    pub fn offline() -> Self {
        Self {
            endpoint_url: None,
            timeout: DEFAULT_TIMEOUT,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            prefer_combined_status: true,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the cache directory
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Choose between the combined status action and two separate calls
    pub fn with_combined_status(mut self, enabled: bool) -> Self {
        self.prefer_combined_status = enabled;
        self
    }

    /// Create an HTTP client from this configuration, if an endpoint is set
    pub fn build_http_client(&self) -> Option<crate::ClientResult<crate::HttpClient>> {
        self.endpoint_url
            .as_deref()
            .map(|url| crate::HttpClient::new(url, self.timeout))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::offline()
    }
}
