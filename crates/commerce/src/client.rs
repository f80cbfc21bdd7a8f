//! HTTP transport for the Shopify Admin API

use crate::config::ShopConfig;
use crate::error::{ApiError, ApiResult};
use crate::transport::{next_page_from_link, ApiRequest, ApiResponse, Method, Transport};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, LINK, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Admin API access token header
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Admin API client
///
/// Sends each request once; there is no retry or backoff.
#[derive(Clone)]
pub struct ShopClient {
    inner: Client,
    config: Arc<ShopConfig>,
    api_root: Arc<str>,
}

impl ShopClient {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        Self::with_config(ShopConfig::from_env()?)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ShopConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(USER_AGENT, HeaderValue::from_static("artprint-commerce/0.3"));

        let mut token = HeaderValue::from_str(&config.access_token)
            .map_err(|_| ApiError::config("access_token contains invalid header characters"))?;
        token.set_sensitive(true);
        default_headers.insert(ACCESS_TOKEN_HEADER, token);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let api_root = Arc::from(config.api_root());

        Ok(Self {
            inner,
            config: Arc::new(config),
            api_root,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Absolute URL for a path below the API root
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    /// Turn an HTTP response into an [`ApiResponse`] or an error
    async fn handle_response(response: Response) -> ApiResult<ApiResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;
        parse_response(status, &headers, text)
    }
}

/// Map status, headers and body text to an [`ApiResponse`].
///
/// Non-2xx statuses become [`ApiError::ApiResponse`] carrying the body, or the
/// canonical reason when the body is empty. An empty 2xx body is `null`.
fn parse_response(
    status: StatusCode,
    headers: &HeaderMap,
    text: String,
) -> ApiResult<ApiResponse> {
    if !status.is_success() {
        let message = if text.trim().is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            text
        };
        return Err(ApiError::api_response(status.as_u16(), message));
    }

    let next_page = headers
        .get(LINK)
        .and_then(|value| value.to_str().ok())
        .and_then(next_page_from_link);

    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text)?
    };

    Ok(ApiResponse {
        status: status.as_u16(),
        body,
        next_page,
    })
}

impl Transport for ShopClient {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let request_id = Uuid::new_v4().to_string();
        let url = self.url_for(&request.path);

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .inner
            .request(method, &url)
            .header(X_REQUEST_ID, &request_id);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let result = Self::handle_response(builder.send().await?).await;

        debug!(
            request_id = %request_id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Request finished"
        );
        result
    }
}
