//! Integration Tests for the Backend Endpoints
//!
//! Drives the router one request at a time and checks status codes and
//! response envelopes.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use storefront::{create_router, BackendState};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, BackendState) {
    let state = BackendState::seeded();
    (create_router(state.clone()), state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn ids(json: &Value) -> Vec<&str> {
    json["data"]["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect()
}

// == Product Listing Tests ==

#[tokio::test]
async fn test_list_products_default() {
    let (app, _) = create_test_app();
    let (status, json) = send(&app, get("/api/products")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(ids(&json), vec!["6", "5", "4", "3", "2", "1"]);
    assert_eq!(
        json["data"]["pagination"],
        json!({"page": 1, "limit": 12, "total": 6, "totalPages": 1})
    );
}

#[tokio::test]
async fn test_list_products_query_parameters() {
    let (app, _) = create_test_app();
    let (status, json) = send(
        &app,
        get("/api/products?page=2&limit=2&sortBy=price&sortOrder=asc"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 29.99, 32.99 | 34.99, 37.99 | 39.99, 42.99
    assert_eq!(ids(&json), vec!["2", "5"]);
    assert_eq!(json["data"]["pagination"]["totalPages"], 3);
}

#[tokio::test]
async fn test_list_products_search_is_form_encoded() {
    let (app, _) = create_test_app();
    let (_, json) = send(&app, get("/api/products?search=forest+green")).await;

    assert_eq!(ids(&json), vec!["4"]);
}

#[tokio::test]
async fn test_list_products_price_bounds() {
    let (app, _) = create_test_app();
    let (_, json) = send(&app, get("/api/products?minPrice=35&maxPrice=40")).await;

    assert_eq!(ids(&json), vec!["5", "3"]);
}

#[tokio::test]
async fn test_list_products_any_tag_and_stock() {
    let (app, _) = create_test_app();
    let (status, json) = send(
        &app,
        get("/api/products?tags=vintage%2Corganic&inStock=true"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), vec!["4", "3"]);

    let (_, json) = send(&app, get("/api/products?inStock=false")).await;
    assert!(ids(&json).is_empty());
}

// == Product Detail Tests ==

#[tokio::test]
async fn test_get_product_by_id_and_slug() {
    let (app, _) = create_test_app();

    let (status, json) = send(&app, get("/api/products/3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["slug"], "sunset-orange-vintage");

    let (status, json) = send(&app, get("/api/products/slug/sunset-orange-vintage")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], "3");
}

#[tokio::test]
async fn test_get_product_not_found() {
    let (app, _) = create_test_app();
    let (status, json) = send(&app, get("/api/products/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_featured_and_related() {
    let (app, _) = create_test_app();

    let (_, json) = send(&app, get("/api/products/featured?limit=2")).await;
    assert_eq!(ids(&json), vec!["1", "2"]);

    let (_, json) = send(&app, get("/api/products/1/related")).await;
    assert_eq!(ids(&json), vec!["2"]);
}

// == Product Mutation Tests ==

#[tokio::test]
async fn test_create_update_delete_product() {
    let (app, state) = create_test_app();
    let input = json!({"name": "Sky Blue Pocket Tee", "price": 27.5, "category": "essentials"});

    let (status, json) = send(&app, with_json("POST", "/api/products", input)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], "7");
    assert_eq!(json["message"], "Product created");

    let update = json!({"name": "Sky Blue Pocket Tee", "price": 21.0, "category": "essentials"});
    let (status, json) = send(&app, with_json("PUT", "/api/products/7", update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["price"], 21.0);

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/products/7")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.catalog.read().await.products().len(), 6);
}

#[tokio::test]
async fn test_create_product_invalid() {
    let (app, _) = create_test_app();
    let input = json!({"name": "", "price": 10.0, "category": "essentials"});

    let (status, json) = send(&app, with_json("POST", "/api/products", input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

// == Category & Review Tests ==

#[tokio::test]
async fn test_categories() {
    let (app, _) = create_test_app();
    let (_, json) = send(&app, get("/api/categories")).await;

    let categories = json["data"].as_array().unwrap();
    assert_eq!(categories.len(), 5);
    assert_eq!(categories[1], json!({"name": "essentials", "productCount": 2}));
}

#[tokio::test]
async fn test_create_and_list_reviews() {
    let (app, _) = create_test_app();
    let review = json!({"rating": 4, "comment": "Soft and true to size"});

    let (status, _) = send(&app, with_json("POST", "/api/products/6/reviews", review)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(&app, get("/api/products/6/reviews")).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["productId"], "6");

    let (_, json) = send(&app, get("/api/products/6")).await;
    assert_eq!(json["data"]["average_rating"], 4.0);
}

#[tokio::test]
async fn test_review_rating_out_of_range() {
    let (app, _) = create_test_app();
    let review = json!({"rating": 0, "comment": "?"});

    let (status, _) = send(&app, with_json("POST", "/api/products/6/reviews", review)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == Cart & Wishlist Tests ==

#[tokio::test]
async fn test_cart_lifecycle() {
    let (app, _) = create_test_app();

    let add = json!({"productId": "2", "quantity": 2, "size": "M"});
    let (status, json) = send(&app, with_json("POST", "/api/cart/add", add)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["itemsCount"], 2);
    let item_id = json["data"]["items"][0]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/cart/update/{}", item_id);
    let (_, json) = send(&app, with_json("PUT", &uri, json!({"quantity": 5}))).await;
    assert_eq!(json["data"]["itemsCount"], 5);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/cart/remove/{}", item_id))
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["items"], json!([]));
}

#[tokio::test]
async fn test_wishlist_add_and_remove() {
    let (app, _) = create_test_app();

    let (_, json) = send(
        &app,
        with_json("POST", "/api/wishlist/add", json!({"productId": "4"})),
    )
    .await;
    assert_eq!(json["data"]["products"][0]["id"], "4");

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/wishlist/remove/4")
        .body(Body::empty())
        .unwrap();
    let (_, json) = send(&app, request).await;
    assert_eq!(json["data"]["products"], json!([]));
}

// == Checkout & Promo Tests ==

#[tokio::test]
async fn test_checkout_empty_cart_rejected() {
    let (app, _) = create_test_app();
    let cart = json!({"items": [], "subtotal": 0.0, "itemsCount": 0});

    let (status, _) = send(&app, with_json("POST", "/api/checkout", cart)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_places_order() {
    let (app, _) = create_test_app();
    let (_, json) = send(
        &app,
        with_json("POST", "/api/cart/add", json!({"productId": "1", "quantity": 1})),
    )
    .await;

    let (status, json) = send(&app, with_json("POST", "/api/checkout", json["data"].clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"]["orderId"].as_str().unwrap().starts_with("order_"));
    assert_eq!(json["message"], "Order placed successfully");
}

#[tokio::test]
async fn test_promo_validation() {
    let (app, _) = create_test_app();

    let (_, json) = send(
        &app,
        with_json("POST", "/api/promo/validate", json!({"code": "welcome"})),
    )
    .await;
    assert_eq!(json["data"], json!({"discount": 5.0, "type": "fixed"}));

    let (status, json) = send(
        &app,
        with_json("POST", "/api/promo/validate", json!({"code": "NOPE"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Invalid code");
}

// == Auth Tests ==

#[tokio::test]
async fn test_login_cookie_authenticates_me() {
    let (app, _) = create_test_app();
    let register = json!({
        "email": "ada@example.com",
        "password": "correct-horse",
        "firstName": "Ada",
        "lastName": "Lovelace"
    });
    let (_, json) = send(&app, with_json("POST", "/api/auth/register", register)).await;
    assert_eq!(json["success"], true);

    let login = json!({"email": "ada@example.com", "password": "correct-horse"});
    let response = app
        .clone()
        .oneshot(with_json("POST", "/api/auth/login", login))
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_check_email_and_profile_update() {
    let (app, _) = create_test_app();
    let check = json!({"email": "ADA@example.com"});
    let (_, json) = send(&app, with_json("POST", "/api/auth/check-email", check.clone())).await;
    assert_eq!(json, json!({"success": true, "exists": false}));

    let register = json!({
        "email": "ada@example.com",
        "password": "correct-horse",
        "firstName": "Ada",
        "lastName": "Lovelace"
    });
    send(&app, with_json("POST", "/api/auth/register", register)).await;
    let (_, json) = send(&app, with_json("POST", "/api/auth/check-email", check)).await;
    assert_eq!(json["exists"], true);

    let login = json!({"email": "ada@example.com", "password": "correct-horse"});
    let (_, json) = send(&app, with_json("POST", "/api/auth/login", login)).await;
    let token = json["tokens"]["accessToken"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("PUT")
        .uri("/api/auth/profile")
        .header("content-type", "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(json!({"lastName": "King"}).to_string()))
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"]["firstName"], "Ada");
    assert_eq!(json["user"]["lastName"], "King");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (app, _) = create_test_app();
    let login = json!({"email": "ghost@example.com", "password": "whatever"});

    let (status, json) = send(&app, with_json("POST", "/api/auth/login", login)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid email or password");
}

// == Health & Error Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();
    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_invalid_json_request() {
    let (app, _) = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/cart/add")
                .header("content-type", "application/json")
                .body(Body::from("not valid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
