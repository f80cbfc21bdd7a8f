//! Transport seam between the product adapters and the wire.

use crate::error::ApiResult;
use reqwest::Url;
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// Opaque cursor for the next page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageToken(String);

impl PageToken {
    /// Wrap a raw cursor.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw cursor, as sent back in `page_info`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A request relative to the Admin API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path below the versioned API root, e.g. `products.json`
    pub path: String,
    /// Query parameters in order
    pub query: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// GET `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// POST `body` to `path`
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    /// PUT `body` to `path`
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    /// DELETE `path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body, `Null` when the body was empty
    pub body: Value,
    /// Cursor for the next page, if the listing continues
    pub next_page: Option<PageToken>,
}

impl ApiResponse {
    /// A 200 response with the given body and no further pages.
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            next_page: None,
        }
    }

    /// Attach a next-page cursor.
    #[must_use]
    pub fn with_next_page(mut self, token: PageToken) -> Self {
        self.next_page = Some(token);
        self
    }
}

/// Sends API requests.
///
/// Implementations turn non-2xx statuses into errors, so callers only ever
/// see successful responses.
pub trait Transport {
    /// Send one request.
    fn send(&self, request: ApiRequest) -> impl Future<Output = ApiResult<ApiResponse>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(&self, request: ApiRequest) -> impl Future<Output = ApiResult<ApiResponse>> + Send {
        (**self).send(request)
    }
}

/// Extract the `page_info` cursor of the `rel="next"` entry of a `Link` header.
///
/// ```
/// use artprint_commerce::transport::next_page_from_link;
///
/// let link = r#"<https://shop.example/products.json?limit=2&page_info=abc>; rel="next""#;
/// assert_eq!(next_page_from_link(link).unwrap().as_str(), "abc");
/// ```
pub fn next_page_from_link(header: &str) -> Option<PageToken> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            return None;
        }

        let url = Url::parse(target.strip_prefix('<')?.strip_suffix('>')?).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page_info")
            .map(|(_, value)| PageToken::new(value.into_owned()))
    })
}
