//! Error types for the storefront
//!
//! Provides unified error handling using thiserror. The same enum is used by
//! the API client, the auth session, the persisted state store and the mock
//! backend handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Storefront Error Enum ==
/// Unified error type for the storefront.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Backend answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Request never produced a response (connect, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Payload could not be (de)serialized
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend answered 2xx but flagged the operation as failed
    #[error("{0}")]
    Unsuccessful(String),

    /// Invalidation pattern is not a valid regular expression
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Persisted state could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorefrontError {
    /// Status code carried by an HTTP error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            StorefrontError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = match &self {
            StorefrontError::NotFound(_) => StatusCode::NOT_FOUND,
            StorefrontError::InvalidRequest(_) | StorefrontError::InvalidPattern(_) => {
                StatusCode::BAD_REQUEST
            }
            StorefrontError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            StorefrontError::Http { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storefront.
pub type Result<T> = std::result::Result<T, StorefrontError>;
