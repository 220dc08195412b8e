//! Client configuration

use shared::DEFAULT_PAGE_SIZE;

use crate::{ClientError, ClientResult};

/// Lookup lists (categories, brands) are fetched in one page of this size
pub const DEFAULT_LOOKUP_LIMIT: u32 = 100;

/// Client configuration for connecting to the catalog API
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | CATALOG_API_URL | http://localhost:5000 | API base URL |
/// | CATALOG_API_TOKEN | (none) | Bearer token |
/// | CATALOG_TIMEOUT_SECS | 30 | Request timeout |
/// | CATALOG_PAGE_SIZE | 12 | Initial page size |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// JWT token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Page size of a freshly created catalog view
    pub page_size: u32,

    /// Page size used for the category/brand lookup lists
    pub lookup_limit: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            page_size: DEFAULT_PAGE_SIZE,
            lookup_limit: DEFAULT_LOOKUP_LIMIT,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("CATALOG_API_URL") {
            config.base_url = url;
        }
        config.token = std::env::var("CATALOG_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        config.timeout = std::env::var("CATALOG_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.timeout);
        config.page_size = std::env::var("CATALOG_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.page_size);
        config
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the initial page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the lookup list size
    pub fn with_lookup_limit(mut self, limit: u32) -> Self {
        self.lookup_limit = limit;
        self
    }

    /// Check the values before building a client
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must be http(s): {:?}",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be positive".into()));
        }
        if self.page_size == 0 || self.lookup_limit == 0 {
            return Err(ClientError::Config("page sizes must be positive".into()));
        }
        Ok(())
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<crate::NetworkCatalogClient> {
        crate::NetworkCatalogClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://api.local")
            .with_token("t0k")
            .with_timeout(5)
            .with_page_size(24);
        assert_eq!(config.token.as_deref(), Some("t0k"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.page_size, 24);
        assert_eq!(config.lookup_limit, DEFAULT_LOOKUP_LIMIT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClientConfig::new("ftp://x").validate().is_err());
        assert!(ClientConfig::default().with_timeout(0).validate().is_err());
        assert!(ClientConfig::default().with_page_size(0).validate().is_err());
    }
}
