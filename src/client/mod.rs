//! API Client Module
//!
//! Typed, optionally cache-backed access to the commerce REST backend.

mod api;
mod request;

pub use api::{
    ApiClient, AUTH_CACHE_PREFIX, CATEGORIES_TTL, NEW_ARRIVALS_TTL, PRODUCTS_TTL,
    PRODUCT_DETAIL_TTL, REVIEWS_TTL, WISHLIST_TTL,
};
pub use request::{cache_key, get_prefix, Method, RequestOptions};
