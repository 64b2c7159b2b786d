//! Storefront - client-side data layer for an apparel shop
//!
//! A TTL response cache, a commerce REST client built on it, a product list
//! store with filtering and sorting, an auth session, and a mock backend
//! serving the same API.

pub mod auth;
pub mod backend;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod persist;
pub mod store;

pub use auth::{AuthSession, LoginCredentials};
pub use backend::{create_router, BackendState};
pub use cache::{shared_cache, SharedCache};
pub use client::ApiClient;
pub use config::Config;
pub use error::{Result, StorefrontError};
pub use persist::LocalStorage;
pub use store::ProductStore;
