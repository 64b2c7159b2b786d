//! Backend Module
//!
//! A mock commerce backend: the REST API the client talks to, served from an
//! in-memory catalogue. Used by the `storefront` binary and by the
//! end-to-end tests.
//!
//! # Endpoints
//! - `/api/auth/*` - register, login, logout, password reset/update, me, refresh
//! - `/api/products` - listing, detail by id or slug, featured, new arrivals,
//!   related, create/update/delete, reviews
//! - `/api/categories` - categories with product counts
//! - `/api/cart/*` and `/api/wishlist/*` - the shopper's cart and wishlist
//! - `POST /api/checkout`, `POST /api/promo/validate`
//! - `GET /health` - health check

pub mod catalog;
pub mod handlers;
pub mod routes;

pub use catalog::{promo_discount, Catalog};
pub use handlers::{BackendState, SESSION_COOKIE};
pub use routes::create_router;
