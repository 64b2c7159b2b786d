//! Backend Routes
//!
//! Configures the Axum router with every commerce API endpoint.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::*;

/// Creates the backend router.
///
/// # Middleware
/// - CORS: allows any origin
/// - Tracing: logs every request
pub fn create_router(state: BackendState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth = Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/reset-password", post(reset_password_handler))
        .route("/update-password", post(update_password_handler))
        .route("/me", get(me_handler))
        .route("/profile", put(update_profile_handler))
        .route("/check-email", post(check_email_handler))
        .route("/refresh", post(refresh_handler));

    let products = Router::new()
        .route("/", get(list_products_handler).post(create_product_handler))
        .route("/featured", get(featured_products_handler))
        .route("/new-arrivals", get(new_arrivals_handler))
        .route("/slug/:slug", get(get_product_by_slug_handler))
        .route(
            "/:id",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .route("/:id/related", get(related_products_handler))
        .route(
            "/:id/reviews",
            get(list_reviews_handler).post(create_review_handler),
        );

    let cart = Router::new()
        .route("/", get(get_cart_handler))
        .route("/add", post(add_to_cart_handler))
        .route("/update/:item_id", put(update_cart_item_handler))
        .route("/remove/:item_id", delete(remove_from_cart_handler))
        .route("/clear", delete(clear_cart_handler));

    let wishlist = Router::new()
        .route("/", get(get_wishlist_handler))
        .route("/add", post(add_to_wishlist_handler))
        .route("/remove/:product_id", delete(remove_from_wishlist_handler));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/checkout", post(checkout_handler))
        .route("/api/promo/validate", post(validate_promo_handler))
        .nest("/api/auth", auth)
        .nest("/api/products", products)
        .nest("/api/cart", cart)
        .nest("/api/wishlist", wishlist)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(BackendState::seeded())
    }

    async fn get_status(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(get_status("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_product_list_endpoint() {
        assert_eq!(get_status("/api/products").await, StatusCode::OK);
        assert_eq!(
            get_status("/api/products?page=1&limit=2&sortBy=price&sortOrder=asc").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_static_segments_win_over_id() {
        assert_eq!(get_status("/api/products/featured").await, StatusCode::OK);
        assert_eq!(get_status("/api/products/new-arrivals?limit=3").await, StatusCode::OK);
        assert_eq!(
            get_status("/api/products/slug/navy-blue-premium").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_product_not_found() {
        assert_eq!(get_status("/api/products/999").await, StatusCode::NOT_FOUND);
        assert_eq!(
            get_status("/api/products/999/reviews").await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_me_without_session_is_unauthorized() {
        assert_eq!(get_status("/api/auth/me").await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_profile_without_session_is_unauthorized() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/auth/profile")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"firstName":"Ada"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_add_to_cart_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/cart/add")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"productId":"1","quantity":2}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
