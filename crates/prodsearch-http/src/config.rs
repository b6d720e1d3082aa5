//! HTTP catalog configuration

use std::time::Duration;

/// Public demo endpoint the product search was built against
pub const DEFAULT_BASE_URL: &str = "https://boolean-spec-frontend.vercel.app/freetestapi";

/// Configuration for the HTTP catalog
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Base URL; `/products` is appended
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl HttpCatalogConfig {
    /// Create a configuration for `base_url` with default timeout and agent
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HttpCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("prodsearch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
