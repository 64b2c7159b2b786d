//! Backend Handlers
//!
//! One handler per endpoint of the commerce API. Handlers lock the shared
//! catalogue, make a single call on it and wrap the result in the response
//! envelope the client expects.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{
        header::{AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

use super::catalog::{promo_discount, Catalog, DEFAULT_PAGE_SIZE, DEFAULT_RELATED_LIMIT};
use crate::error::{Result, StorefrontError};
use crate::models::{
    AddToCartRequest, ApiResponse, AuthResponse, Cart, CartResponse, CategoriesResponse,
    CheckoutResponse, EmailCheckRequest, EmailCheckResponse, HealthResponse, LoginRequest,
    ProductInput, ProductQuery, ProductResponse, ProductsResponse, ProfileUpdate, PromoRequest, PromoResponse, RefreshRequest, RegisterRequest,
    ResetPasswordRequest, ReviewRequest, ReviewResponse, ReviewsResponse, UpdateCartItemRequest,
    UpdatePasswordRequest, WishlistRequest, WishlistResponse,
};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Backend state shared across all handlers.
#[derive(Clone)]
pub struct BackendState {
    pub catalog: Arc<RwLock<Catalog>>,
}

impl BackendState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    /// State over the seeded apparel catalogue.
    pub fn seeded() -> Self {
        Self::new(Catalog::seeded())
    }
}

/// `?limit=` for the short product lists.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u32>,
}

// == Health ==

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// == Auth ==

pub async fn register_handler(
    State(state): State<BackendState>,
    Json(req): Json<RegisterRequest>,
) -> Json<AuthResponse> {
    let response = state.catalog.write().await.register(&req);
    if response.success {
        info!(email = %req.email, "account registered");
    }
    Json(response)
}

/// Handler for POST /api/auth/login
///
/// Wrong credentials answer 200 with `success: false`. A successful login
/// also sets the session cookie.
pub async fn login_handler(
    State(state): State<BackendState>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let response = state.catalog.write().await.login(&req);
    let token = response
        .tokens
        .as_ref()
        .filter(|_| response.success)
        .map(|tokens| tokens.access_token.clone());
    let Some(token) = token else {
        return Json(response).into_response();
    };

    info!(email = %req.email, "session opened");
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=86400",
        SESSION_COOKIE, token
    );
    ([(SET_COOKIE, cookie)], Json(response)).into_response()
}

/// Handler for POST /api/auth/logout
///
/// Ends whichever session the request carries and expires the cookie.
pub async fn logout_handler(State(state): State<BackendState>, headers: HeaderMap) -> Response {
    let token = session_token(&headers);
    let response = state.catalog.write().await.logout(token.as_deref());
    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
    ([(SET_COOKIE, cookie)], Json(response)).into_response()
}

pub async fn reset_password_handler(
    State(state): State<BackendState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Json<AuthResponse> {
    Json(state.catalog.read().await.reset_password(&req.email))
}

pub async fn update_password_handler(
    State(state): State<BackendState>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Json<AuthResponse> {
    Json(state.catalog.write().await.update_password(&req))
}

/// Handler for GET /api/auth/me
///
/// Accepts the session cookie or an `Authorization: Bearer` token.
pub async fn me_handler(
    State(state): State<BackendState>,
    headers: HeaderMap,
) -> Result<Json<AuthResponse>> {
    let token = session_token(&headers)
        .ok_or_else(|| StorefrontError::Unauthorized("No active session".to_string()))?;
    let user = state
        .catalog
        .read()
        .await
        .user_for_token(&token)
        .ok_or_else(|| StorefrontError::Unauthorized("Session expired".to_string()))?;

    Ok(Json(AuthResponse::ok("Authenticated").with_user(user)))
}

/// Handler for PUT /api/auth/profile
pub async fn update_profile_handler(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<AuthResponse>> {
    let token = session_token(&headers)
        .ok_or_else(|| StorefrontError::Unauthorized("No active session".to_string()))?;
    let response = state
        .catalog
        .write()
        .await
        .update_profile(&token, &update)?;
    Ok(Json(response))
}

pub async fn check_email_handler(
    State(state): State<BackendState>,
    Json(req): Json<EmailCheckRequest>,
) -> Json<EmailCheckResponse> {
    let exists = state.catalog.read().await.email_exists(&req.email);
    Json(EmailCheckResponse {
        success: true,
        exists,
    })
}

pub async fn refresh_handler(
    State(state): State<BackendState>,
    Json(req): Json<RefreshRequest>,
) -> Json<AuthResponse> {
    Json(state.catalog.write().await.refresh(&req.refresh_token))
}

// == Products ==

/// Handler for GET /api/products
pub async fn list_products_handler(
    State(state): State<BackendState>,
    Query(query): Query<ProductQuery>,
) -> Json<ProductsResponse> {
    Json(ApiResponse::ok(state.catalog.read().await.list(&query)))
}

pub async fn get_product_handler(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let catalog = state.catalog.read().await;
    Ok(Json(ApiResponse::ok(catalog.product(&id)?.clone())))
}

pub async fn get_product_by_slug_handler(
    State(state): State<BackendState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductResponse>> {
    let catalog = state.catalog.read().await;
    Ok(Json(ApiResponse::ok(catalog.product_by_slug(&slug)?.clone())))
}

pub async fn create_product_handler(
    State(state): State<BackendState>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductResponse>> {
    let product = state.catalog.write().await.create_product(input)?;
    info!(id = %product.id, "product created");
    Ok(Json(
        ApiResponse::ok(product).with_message("Product created"),
    ))
}

pub async fn update_product_handler(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductResponse>> {
    let product = state.catalog.write().await.update_product(&id, input)?;
    Ok(Json(
        ApiResponse::ok(product).with_message("Product updated"),
    ))
}

pub async fn delete_product_handler(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let product = state.catalog.write().await.delete_product(&id)?;
    info!(%id, "product deleted");
    Ok(Json(
        ApiResponse::ok(product).with_message("Product deleted"),
    ))
}

pub async fn featured_products_handler(
    State(state): State<BackendState>,
    Query(query): Query<LimitQuery>,
) -> Json<ProductsResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    Json(ApiResponse::ok(state.catalog.read().await.featured(limit)))
}

pub async fn new_arrivals_handler(
    State(state): State<BackendState>,
    Query(query): Query<LimitQuery>,
) -> Json<ProductsResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    Json(ApiResponse::ok(state.catalog.read().await.new_arrivals(limit)))
}

pub async fn related_products_handler(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ProductsResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    let page = state.catalog.read().await.related(&id, limit)?;
    Ok(Json(ApiResponse::ok(page)))
}

// == Categories & Reviews ==

pub async fn categories_handler(State(state): State<BackendState>) -> Json<CategoriesResponse> {
    Json(ApiResponse::ok(state.catalog.read().await.categories()))
}

pub async fn list_reviews_handler(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<ReviewsResponse>> {
    let reviews = state.catalog.read().await.reviews(&id)?;
    Ok(Json(ApiResponse::ok(reviews)))
}

pub async fn create_review_handler(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>> {
    let review = state.catalog.write().await.add_review(&id, req)?;
    Ok(Json(
        ApiResponse::ok(review).with_message("Review submitted"),
    ))
}

// == Cart ==

pub async fn get_cart_handler(State(state): State<BackendState>) -> Json<CartResponse> {
    Json(ApiResponse::ok(state.catalog.read().await.cart()))
}

pub async fn add_to_cart_handler(
    State(state): State<BackendState>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    let cart = state.catalog.write().await.add_to_cart(req)?;
    Ok(Json(ApiResponse::ok(cart)))
}

pub async fn update_cart_item_handler(
    State(state): State<BackendState>,
    Path(item_id): Path<String>,
    Json(req): Json<UpdateCartItemRequest>,
) -> Result<Json<CartResponse>> {
    let cart = state
        .catalog
        .write()
        .await
        .update_cart_item(&item_id, req.quantity)?;
    Ok(Json(ApiResponse::ok(cart)))
}

pub async fn remove_from_cart_handler(
    State(state): State<BackendState>,
    Path(item_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let cart = state.catalog.write().await.remove_from_cart(&item_id)?;
    Ok(Json(ApiResponse::ok(cart)))
}

pub async fn clear_cart_handler(State(state): State<BackendState>) -> Json<CartResponse> {
    Json(ApiResponse::ok(state.catalog.write().await.clear_cart()))
}

// == Wishlist ==

pub async fn get_wishlist_handler(State(state): State<BackendState>) -> Json<WishlistResponse> {
    Json(ApiResponse::ok(state.catalog.read().await.wishlist()))
}

pub async fn add_to_wishlist_handler(
    State(state): State<BackendState>,
    Json(req): Json<WishlistRequest>,
) -> Result<Json<WishlistResponse>> {
    let wishlist = state.catalog.write().await.add_to_wishlist(&req.product_id)?;
    Ok(Json(ApiResponse::ok(wishlist)))
}

pub async fn remove_from_wishlist_handler(
    State(state): State<BackendState>,
    Path(product_id): Path<String>,
) -> Json<WishlistResponse> {
    Json(ApiResponse::ok(
        state.catalog.write().await.remove_from_wishlist(&product_id),
    ))
}

// == Checkout & Promo ==

pub async fn checkout_handler(
    State(state): State<BackendState>,
    Json(cart): Json<Cart>,
) -> Result<Json<CheckoutResponse>> {
    let confirmation = state.catalog.write().await.checkout(&cart)?;
    info!(order_id = %confirmation.order_id, items = cart.items_count, "order placed");
    Ok(Json(
        ApiResponse::ok(confirmation).with_message("Order placed successfully"),
    ))
}

/// Handler for POST /api/promo/validate
///
/// Unknown codes answer 200 with `success: false`.
pub async fn validate_promo_handler(Json(req): Json<PromoRequest>) -> Json<PromoResponse> {
    Json(match promo_discount(&req.code) {
        Some(discount) => ApiResponse::ok(discount).with_message("Promo applied"),
        None => ApiResponse::failure("Invalid code"),
    })
}

/// Session token from a bearer header, else from the session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
