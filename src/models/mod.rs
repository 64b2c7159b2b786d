//! Request and Response models for the commerce API
//!
//! Typed shapes for every endpoint the client calls and the mock backend
//! serves, plus the catalogue types they carry.

pub mod commerce;
pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use commerce::{
    average_rating, Cart, CartItem, Category, DiscountType, OrderConfirmation, PromoDiscount, Review, User,
    Wishlist,
};
pub use product::{
    discount_percent, Pagination, Product, ProductInput, ProductQuery, SortOrder, StockStatus,
    LOW_STOCK_THRESHOLD,
};
pub use requests::{
    AddToCartRequest, EmailCheckRequest, LoginRequest, ProfileUpdate, PromoRequest,
    RefreshRequest, RegisterRequest, ResetPasswordRequest, ReviewRequest, UpdateCartItemRequest,
    UpdatePasswordRequest, WishlistRequest,
};
pub use responses::{
    ApiResponse, AuthResponse, AuthTokens, CartResponse, CategoriesResponse, CheckoutResponse,
    EmailCheckResponse, HealthResponse, ProductPage, ProductResponse, ProductsResponse, PromoResponse,
    ReviewResponse, ReviewsResponse, WishlistResponse,
};
