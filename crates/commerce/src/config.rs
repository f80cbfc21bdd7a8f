//! Shop credentials and connection settings
//!
//! Built once at start-up, usually from the environment, and passed to
//! [`ShopClient`](crate::ShopClient) explicitly.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Admin API version used when `SHOPIFY_API_VERSION` is unset
pub const DEFAULT_API_VERSION: &str = "2024-01";

/// App host name used when `SHOPIFY_HOST_NAME` is unset
pub const DEFAULT_HOST_NAME: &str = "localhost";

/// Connection settings for one shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Shop domain, e.g. `artprint.myshopify.com`
    pub shop_name: String,
    /// Admin API access token
    pub access_token: String,
    /// Admin API version, e.g. `2024-01`
    pub api_version: String,
    /// App API key
    pub api_key: Option<String>,
    /// App API secret
    pub api_secret: Option<String>,
    /// App host name
    pub host_name: String,
    /// Overrides `https://{shop_name}` as the API origin
    pub base_url: Option<String>,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl ShopConfig {
    /// Create a configuration for a shop with default version and timeout
    pub fn new(shop_name: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: None,
            api_secret: None,
            host_name: DEFAULT_HOST_NAME.to_string(),
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SHOPIFY_SHOP_NAME`: Shop domain (required)
    /// - `SHOPIFY_ACCESS_TOKEN`: Admin API access token (required)
    /// - `SHOPIFY_API_VERSION`: Admin API version (default `2024-01`)
    /// - `SHOPIFY_API_KEY`, `SHOPIFY_API_SECRET`: App credentials
    /// - `SHOPIFY_HOST_NAME`: App host name (default `localhost`)
    /// - `SHOPIFY_TIMEOUT_SECS`: Request timeout in seconds (default 30)
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let required = |key: &str| var(key).ok_or_else(|| ApiError::missing_env(key));
        let shop_name = required("SHOPIFY_SHOP_NAME")?;
        let access_token = required("SHOPIFY_ACCESS_TOKEN")?;

        let mut config = Self::new(shop_name, access_token);
        if let Some(version) = var("SHOPIFY_API_VERSION") {
            config.api_version = version;
        }
        if let Some(host) = var("SHOPIFY_HOST_NAME") {
            config.host_name = host;
        }
        config.api_key = var("SHOPIFY_API_KEY");
        config.api_secret = var("SHOPIFY_API_SECRET");
        if let Some(secs) = var("SHOPIFY_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Builder-style method to set the API version
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Builder-style method to point at a different origin
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Versioned Admin API root, e.g. `https://artprint.myshopify.com/admin/api/2024-01`
    pub fn api_root(&self) -> String {
        let origin = match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let shop = self
                    .shop_name
                    .trim_start_matches("https://")
                    .trim_start_matches("http://");
                format!("https://{}", shop.trim_end_matches('/'))
            }
        };
        format!("{origin}/admin/api/{}", self.api_version)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.shop_name.trim().is_empty() {
            return Err(ApiError::config("shop_name cannot be empty"));
        }

        if self.access_token.trim().is_empty() {
            return Err(ApiError::config("access_token cannot be empty"));
        }

        if self.api_version.trim().is_empty() {
            return Err(ApiError::config("api_version cannot be empty"));
        }

        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::config("base_url must start with http:// or https://"));
            }
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
