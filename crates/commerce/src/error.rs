//! Error types for the commerce client

use crate::types::UserError;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Commerce client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// A mutation was rejected with field-level errors
    #[error("Rejected by the shop: {}", format_user_errors(.0))]
    UserErrors(Vec<UserError>),

    /// The GraphQL endpoint reported top-level errors
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The requested product does not exist
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Reading a local file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Create an unexpected response error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
