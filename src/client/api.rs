//! Commerce API client
//!
//! Turns typed method calls into JSON requests against the backend. GETs can
//! be memoized in the shared TTL cache; successful mutations invalidate the
//! cached GETs of the resource they touched. Every call is a single attempt.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use super::request::{cache_key, get_prefix, RequestOptions};
use crate::cache::{InvalidationPattern, SharedCache, DEFAULT_TTL_SECONDS};
use crate::config::Config;
use crate::error::{Result, StorefrontError};
use crate::models::{
    AddToCartRequest, AuthResponse, CartResponse, CategoriesResponse, CheckoutResponse, Cart,
    EmailCheckRequest, EmailCheckResponse, LoginRequest, ProductInput, ProductQuery,
    ProductResponse, ProductsResponse, ProfileUpdate, PromoRequest,
    PromoResponse, RefreshRequest, RegisterRequest, ResetPasswordRequest, ReviewRequest,
    ReviewResponse, ReviewsResponse, UpdateCartItemRequest, UpdatePasswordRequest,
    WishlistRequest, WishlistResponse,
};

// == Cache Lifetimes (seconds) ==
pub const PRODUCTS_TTL: u64 = 300;
pub const PRODUCT_DETAIL_TTL: u64 = 600;
pub const NEW_ARRIVALS_TTL: u64 = 300;
pub const CATEGORIES_TTL: u64 = 3600;
pub const REVIEWS_TTL: u64 = 300;
pub const WISHLIST_TTL: u64 = 300;

/// Key prefix for session-scoped cache entries.
pub const AUTH_CACHE_PREFIX: &str = "auth:";

/// Client for the commerce REST backend.
///
/// Cloning is cheap: the HTTP connection pool, cookie jar and cache are shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    cache: SharedCache,
    /// TTL in seconds for cached calls that leave `cache_ttl` unset
    default_ttl: u64,
}

impl ApiClient {
    /// Creates a client for `base_url` with a cookie store, so session
    /// cookies set by the backend are sent on every later call. Timeout and
    /// default cache TTL come from `Config::default()`.
    pub fn new(base_url: impl Into<String>, cache: SharedCache) -> Result<Self> {
        let config = Config {
            api_url: base_url.into(),
            ..Config::default()
        };
        Self::from_config(&config, cache)
    }

    /// Creates a client from configuration: base URL, request timeout and
    /// the TTL for cached calls that do not name their own.
    pub fn from_config(config: &Config, cache: SharedCache) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;
        Ok(Self::with_client(http, config.api_url.clone(), cache)
            .with_default_ttl(config.default_cache_ttl))
    }

    /// Creates a client around a custom HTTP client
    pub fn with_client(http: Client, base_url: impl Into<String>, cache: SharedCache) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            cache,
            default_ttl: DEFAULT_TTL_SECONDS,
        }
    }

    /// Replaces the TTL applied to cached calls without an explicit one.
    pub fn with_default_ttl(mut self, ttl_seconds: u64) -> Self {
        self.default_ttl = ttl_seconds;
        self
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle to the cache this client reads and invalidates.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Core Request ==
    /// Performs one request and decodes the JSON reply as `T`.
    ///
    /// Cached GETs are answered from the cache when a live entry exists and
    /// stored after a successful fetch. Non-2xx replies become
    /// `StorefrontError::Http` carrying the status.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let method = options.method;
        let key = cache_key(method, endpoint, options.body.as_ref());

        if options.uses_cache() {
            let cached = self.cache.write().await.get(&key);
            if let Some(value) = cached {
                debug!(%key, "cache hit");
                return Ok(serde_json::from_value(value)?);
            }
            debug!(%key, "cache miss");
        }

        let headers = build_headers(&options.headers)?;
        let url = format!("{}{}", self.base_url, endpoint);
        let mut builder = self.http.request(method.into(), &url).headers(headers);
        if method.is_mutation() {
            if let Some(body) = &options.body {
                builder = builder.body(serde_json::to_vec(body)?);
            }
        }

        debug!(method = method.as_str(), %endpoint, "sending request");
        let response = builder.send().await.map_err(|err| {
            error!(method = method.as_str(), %endpoint, error = %err, "API request failed");
            StorefrontError::from(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let err = StorefrontError::Http {
                status: status.as_u16(),
            };
            error!(method = method.as_str(), %endpoint, error = %err, "API request failed");
            return Err(err);
        }

        let value: Value = response.json().await?;
        if options.uses_cache() {
            let ttl = options.cache_ttl.unwrap_or(self.default_ttl);
            self.cache.write().await.set(key, value.clone(), ttl);
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Drops cached GETs whose endpoint starts with `endpoint`.
    pub async fn invalidate_endpoint(&self, endpoint: &str) -> usize {
        self.invalidate(&InvalidationPattern::prefix(get_prefix(endpoint)))
            .await
    }

    pub async fn invalidate(&self, pattern: &InvalidationPattern) -> usize {
        self.cache.write().await.invalidate(pattern)
    }

    // == Auth ==

    pub async fn register(&self, user: &RegisterRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .request("/api/auth/register", RequestOptions::post(Some(to_body(user)?)))
            .await?;
        if response.success {
            self.invalidate(&InvalidationPattern::prefix(AUTH_CACHE_PREFIX))
                .await;
        }
        Ok(response)
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .request("/api/auth/login", RequestOptions::post(Some(to_body(credentials)?)))
            .await?;
        if response.success {
            self.invalidate(&InvalidationPattern::prefix(AUTH_CACHE_PREFIX))
                .await;
        }
        Ok(response)
    }

    /// Ends the server session and drops the whole cache.
    pub async fn logout(&self) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .request("/api/auth/logout", RequestOptions::post(None))
            .await?;
        self.invalidate(&InvalidationPattern::All).await;
        Ok(response)
    }

    pub async fn reset_password(&self, email: &str) -> Result<AuthResponse> {
        let body = to_body(&ResetPasswordRequest {
            email: email.to_string(),
        })?;
        self.request("/api/auth/reset-password", RequestOptions::post(Some(body)))
            .await
    }

    pub async fn update_password(&self, update: &UpdatePasswordRequest) -> Result<AuthResponse> {
        self.request(
            "/api/auth/update-password",
            RequestOptions::post(Some(to_body(update)?)),
        )
        .await
    }

    /// Fetches the user behind the current session cookie or bearer token.
    pub async fn current_user(&self, access_token: Option<&str>) -> Result<AuthResponse> {
        let mut options = RequestOptions::get();
        if let Some(token) = access_token {
            options = options.header("Authorization", format!("Bearer {}", token));
        }
        self.request("/api/auth/me", options).await
    }

    /// Edits the profile of the user behind the session cookie or bearer token.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        access_token: Option<&str>,
    ) -> Result<AuthResponse> {
        let mut options = RequestOptions::put(to_body(update)?);
        if let Some(token) = access_token {
            options = options.header("Authorization", format!("Bearer {}", token));
        }
        self.request("/api/auth/profile", options).await
    }

    pub async fn check_email(&self, email: &str) -> Result<EmailCheckResponse> {
        let body = to_body(&EmailCheckRequest {
            email: email.to_string(),
        })?;
        self.request("/api/auth/check-email", RequestOptions::post(Some(body)))
            .await
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthResponse> {
        let body = to_body(&RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        self.request("/api/auth/refresh", RequestOptions::post(Some(body)))
            .await
    }

    // == Products ==

    pub async fn get_products(&self, query: &ProductQuery) -> Result<ProductsResponse> {
        let query_string = query.to_query_string();
        let endpoint = if query_string.is_empty() {
            "/api/products".to_string()
        } else {
            format!("/api/products?{}", query_string)
        };
        self.request(&endpoint, RequestOptions::cached(PRODUCTS_TTL))
            .await
    }

    pub async fn get_product_by_id(&self, id: &str) -> Result<ProductResponse> {
        self.request(
            &format!("/api/products/{}", id),
            RequestOptions::cached(PRODUCT_DETAIL_TTL),
        )
        .await
    }

    pub async fn get_product_by_slug(&self, slug: &str) -> Result<ProductResponse> {
        self.request(
            &format!("/api/products/slug/{}", slug),
            RequestOptions::cached(PRODUCT_DETAIL_TTL),
        )
        .await
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<ProductResponse> {
        let response: ProductResponse = self
            .request("/api/products", RequestOptions::post(Some(to_body(input)?)))
            .await?;
        if response.success {
            self.invalidate_endpoint("/api/products").await;
        }
        Ok(response)
    }

    pub async fn update_product(&self, id: &str, input: &ProductInput) -> Result<ProductResponse> {
        let endpoint = format!("/api/products/{}", id);
        let response: ProductResponse = self
            .request(&endpoint, RequestOptions::put(to_body(input)?))
            .await?;
        if response.success {
            self.invalidate_endpoint("/api/products").await;
            self.invalidate_endpoint(&endpoint).await;
        }
        Ok(response)
    }

    pub async fn delete_product(&self, id: &str) -> Result<ProductResponse> {
        let endpoint = format!("/api/products/{}", id);
        let response: ProductResponse = self.request(&endpoint, RequestOptions::delete()).await?;
        if response.success {
            self.invalidate_endpoint("/api/products").await;
            self.invalidate_endpoint(&endpoint).await;
        }
        Ok(response)
    }

    pub async fn get_featured_products(&self, limit: u32) -> Result<ProductsResponse> {
        self.request(
            &format!("/api/products/featured?limit={}", limit),
            RequestOptions::cached(PRODUCT_DETAIL_TTL),
        )
        .await
    }

    pub async fn get_new_arrivals(&self, limit: u32) -> Result<ProductsResponse> {
        self.request(
            &format!("/api/products/new-arrivals?limit={}", limit),
            RequestOptions::cached(NEW_ARRIVALS_TTL),
        )
        .await
    }

    pub async fn get_related_products(&self, id: &str, limit: u32) -> Result<ProductsResponse> {
        self.request(
            &format!("/api/products/{}/related?limit={}", id, limit),
            RequestOptions::cached(PRODUCT_DETAIL_TTL),
        )
        .await
    }

    // == Categories ==

    pub async fn get_categories(&self) -> Result<CategoriesResponse> {
        self.request("/api/categories", RequestOptions::cached(CATEGORIES_TTL))
            .await
    }

    // == Reviews ==

    pub async fn get_product_reviews(&self, product_id: &str) -> Result<ReviewsResponse> {
        self.request(
            &format!("/api/products/{}/reviews", product_id),
            RequestOptions::cached(REVIEWS_TTL),
        )
        .await
    }

    pub async fn create_review(
        &self,
        product_id: &str,
        review: &ReviewRequest,
    ) -> Result<ReviewResponse> {
        let endpoint = format!("/api/products/{}/reviews", product_id);
        let response: ReviewResponse = self
            .request(&endpoint, RequestOptions::post(Some(to_body(review)?)))
            .await?;
        if response.success {
            self.invalidate_endpoint(&format!("/api/products/{}", product_id))
                .await;
            self.invalidate_endpoint(&endpoint).await;
        }
        Ok(response)
    }

    // == Cart (never cached) ==

    pub async fn get_cart(&self) -> Result<CartResponse> {
        self.request("/api/cart", RequestOptions::get()).await
    }

    pub async fn add_to_cart(
        &self,
        product_id: &str,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<CartResponse> {
        let body = to_body(&AddToCartRequest {
            product_id: product_id.to_string(),
            quantity,
            size: size.map(str::to_string),
            color: color.map(str::to_string),
        })?;
        self.request("/api/cart/add", RequestOptions::post(Some(body)))
            .await
    }

    pub async fn update_cart_item(&self, item_id: &str, quantity: u32) -> Result<CartResponse> {
        let body = to_body(&UpdateCartItemRequest { quantity })?;
        self.request(
            &format!("/api/cart/update/{}", item_id),
            RequestOptions::put(body),
        )
        .await
    }

    pub async fn remove_from_cart(&self, item_id: &str) -> Result<CartResponse> {
        self.request(
            &format!("/api/cart/remove/{}", item_id),
            RequestOptions::delete(),
        )
        .await
    }

    pub async fn clear_cart(&self) -> Result<CartResponse> {
        self.request("/api/cart/clear", RequestOptions::delete())
            .await
    }

    // == Wishlist ==

    pub async fn get_wishlist(&self) -> Result<WishlistResponse> {
        self.request("/api/wishlist", RequestOptions::cached(WISHLIST_TTL))
            .await
    }

    pub async fn add_to_wishlist(&self, product_id: &str) -> Result<WishlistResponse> {
        let body = to_body(&WishlistRequest {
            product_id: product_id.to_string(),
        })?;
        let response: WishlistResponse = self
            .request("/api/wishlist/add", RequestOptions::post(Some(body)))
            .await?;
        if response.success {
            self.invalidate_endpoint("/api/wishlist").await;
        }
        Ok(response)
    }

    pub async fn remove_from_wishlist(&self, product_id: &str) -> Result<WishlistResponse> {
        let response: WishlistResponse = self
            .request(
                &format!("/api/wishlist/remove/{}", product_id),
                RequestOptions::delete(),
            )
            .await?;
        if response.success {
            self.invalidate_endpoint("/api/wishlist").await;
        }
        Ok(response)
    }

    // == Checkout ==

    pub async fn checkout(&self, cart: &Cart) -> Result<CheckoutResponse> {
        self.request("/api/checkout", RequestOptions::post(Some(to_body(cart)?)))
            .await
    }

    pub async fn validate_promo_code(&self, code: &str) -> Result<PromoResponse> {
        let body = to_body(&PromoRequest {
            code: code.to_string(),
        })?;
        self.request("/api/promo/validate", RequestOptions::post(Some(body)))
            .await
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Default JSON content type, overridden by any same-named caller header.
fn build_headers(extra: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| StorefrontError::InvalidRequest(format!("invalid header name: {}", name)))?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            StorefrontError::InvalidRequest(format!("invalid value for header {}", name))
        })?;
        headers.insert(name, value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::shared_cache;
    use crate::client::Method;
    use serde_json::json;

    #[test]
    fn test_build_headers_default_content_type() {
        let headers = build_headers(&[]).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_build_headers_override() {
        let headers = build_headers(&[
            ("Content-Type".to_string(), "text/plain".to_string()),
            ("X-Trace".to_string(), "abc".to_string()),
        ])
        .unwrap();
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers["x-trace"], "abc");
    }

    #[test]
    fn test_build_headers_rejects_bad_name() {
        let result = build_headers(&[("bad header".to_string(), "v".to_string())]);
        assert!(matches!(result, Err(StorefrontError::InvalidRequest(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_client(Client::new(), "http://shop.test/", shared_cache(300));
        assert_eq!(client.base_url(), "http://shop.test");
    }

    #[test]
    fn test_from_config_applies_settings() {
        let config = Config {
            api_url: "http://shop.test/".to_string(),
            default_cache_ttl: 7,
            ..Config::default()
        };
        let client = ApiClient::from_config(&config, shared_cache(300)).unwrap();
        assert_eq!(client.base_url(), "http://shop.test");
        assert_eq!(client.default_ttl(), 7);
    }

    #[test]
    fn test_new_uses_config_defaults() {
        let client = ApiClient::new("http://shop.test", shared_cache(300)).unwrap();
        assert_eq!(client.default_ttl(), DEFAULT_TTL_SECONDS);
    }

    #[tokio::test]
    async fn test_cached_get_served_without_network() {
        // Port 9 (discard) is never listening; only a cache hit can succeed
        let cache = shared_cache(300);
        let client = ApiClient::with_client(Client::new(), "http://127.0.0.1:9", cache.clone());
        cache.write().await.set(
            "GET:/api/categories:null",
            json!({"success": true, "data": [{"name": "essentials", "productCount": 2}]}),
            60,
        );

        let response = client.get_categories().await.unwrap();
        let categories = response.into_data().unwrap();
        assert_eq!(categories[0].name, "essentials");
    }

    #[tokio::test]
    async fn test_invalidate_endpoint_uses_get_prefix() {
        let cache = shared_cache(300);
        let client = ApiClient::with_client(Client::new(), "http://127.0.0.1:9", cache.clone());
        {
            let mut guard = cache.write().await;
            guard.set("GET:/api/wishlist:null", json!({}), 60);
            let body = json!({"productId": "1"});
            guard.set(cache_key(Method::Post, "/api/wishlist/add", Some(&body)), json!({}), 60);
        }

        assert_eq!(client.invalidate_endpoint("/api/wishlist").await, 1);
        assert_eq!(cache.read().await.len(), 1);
    }
}
