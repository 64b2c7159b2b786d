//! Response DTOs
//!
//! Every endpoint answers with a typed envelope; the aliases at the bottom
//! name the concrete shape each client method returns.

use serde::{Deserialize, Serialize};

use super::{
    Cart, Category, OrderConfirmation, Pagination, Product, PromoDiscount, Review, User, Wishlist,
};
use crate::error::{Result, StorefrontError};

/// Standard `{ success, data, message, error }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// Unwraps the payload of a successful response.
    ///
    /// `success: false` or a missing payload becomes `Unsuccessful` carrying
    /// the backend's error or message text.
    pub fn into_data(self) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(StorefrontError::Unsuccessful(
                self.error
                    .or(self.message)
                    .unwrap_or_else(|| "API returned unsuccessful response".to_string()),
            )),
        }
    }
}

/// Products plus paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Tokens minted for an authenticated session (expiry in Unix ms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_at: u64,
}

/// Reply of every auth endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<AuthTokens>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl AuthResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: None,
            tokens: None,
            errors: Vec::new(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ok(message)
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_tokens(mut self, tokens: AuthTokens) -> Self {
        self.tokens = Some(tokens);
        self
    }
}

/// Reply of `POST /api/auth/check-email`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheckResponse {
    pub success: bool,
    #[serde(default)]
    pub exists: bool,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

pub type ProductsResponse = ApiResponse<ProductPage>;
pub type ProductResponse = ApiResponse<Product>;
pub type CategoriesResponse = ApiResponse<Vec<Category>>;
pub type ReviewsResponse = ApiResponse<Vec<Review>>;
pub type ReviewResponse = ApiResponse<Review>;
pub type CartResponse = ApiResponse<Cart>;
pub type WishlistResponse = ApiResponse<Wishlist>;
pub type PromoResponse = ApiResponse<PromoDiscount>;
pub type CheckoutResponse = ApiResponse<OrderConfirmation>;
