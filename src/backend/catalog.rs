//! In-memory commerce catalogue
//!
//! Everything the mock backend serves lives here: products, reviews, a single
//! shopper's cart and wishlist, and the accounts and sessions behind the auth
//! endpoints. Handlers lock it and call one method per request.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};

use crate::cache::current_timestamp_ms;
use crate::error::{Result, StorefrontError};
use crate::models::{
    average_rating, AddToCartRequest, AuthResponse, AuthTokens, Cart, CartItem, Category, DiscountType,
    LoginRequest, OrderConfirmation, Pagination, Product, ProductInput, ProductPage,
    ProductQuery, ProfileUpdate, PromoDiscount, RegisterRequest, Review, ReviewRequest, SortOrder,
    UpdatePasswordRequest, User, Wishlist,
};

// == Defaults ==
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_RELATED_LIMIT: u32 = 4;

/// Lifetime of an issued session, in milliseconds.
pub const SESSION_LIFETIME_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Clone)]
struct Session {
    email: String,
    expires_at: u64,
}

/// Mutable state of the mock backend.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    reviews: Vec<Review>,
    cart: Vec<CartItem>,
    wishlist: Vec<String>,
    /// Keyed by lowercased email
    accounts: HashMap<String, Account>,
    /// Keyed by access token
    sessions: HashMap<String, Session>,
    refresh_tokens: HashMap<String, String>,
    next_id: u64,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        let next_id = products.len() as u64 + 1;
        Self {
            products,
            next_id,
            ..Self::default()
        }
    }

    /// Catalogue preloaded with the apparel collection.
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // == Products ==

    /// One page of active products matching `query`.
    ///
    /// Sorting defaults to `createdAt` descending; `title`/`name`, `price`
    /// and `rating` are the other keys. Unknown keys fall back to `createdAt`.
    pub fn list(&self, query: &ProductQuery) -> ProductPage {
        let page = query.page.filter(|p| *p > 0).unwrap_or(1);
        let limit = query.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_PAGE_SIZE);
        let category = query.category.as_deref().filter(|c| !c.is_empty());
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.is_active)
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter(|p| query.tags.is_empty() || query.tags.iter().any(|t| p.tags.contains(t)))
            .filter(|p| query.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| query.max_price.map_or(true, |max| p.price <= max))
            .filter(|p| query.in_stock.map_or(true, |want| p.in_stock() == want))
            .filter(|p| search.as_deref().map_or(true, |needle| p.matches_query(needle)))
            .collect();

        let descending = query.sort_order != Some(SortOrder::Asc);
        let sort_by = query.sort_by.as_deref().unwrap_or("createdAt");
        matches.sort_by(|a, b| {
            let ordering = match sort_by {
                "title" | "name" => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                "price" => a.price.total_cmp(&b.price),
                "rating" => a.average_rating.total_cmp(&b.average_rating),
                _ => a.created_at.cmp(&b.created_at),
            };
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let total = matches.len() as u32;
        let start = (page as usize - 1).saturating_mul(limit as usize);
        let products = matches
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        ProductPage {
            products,
            pagination: Pagination::new(page, limit, total),
        }
    }

    pub fn product(&self, id: &str) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StorefrontError::NotFound(format!("Product '{}' not found", id)))
    }

    pub fn product_by_slug(&self, slug: &str) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| StorefrontError::NotFound(format!("Product '{}' not found", slug)))
    }

    pub fn featured(&self, limit: u32) -> ProductPage {
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.is_active && p.featured)
            .take(limit as usize)
            .cloned()
            .collect();
        single_page(products, limit)
    }

    /// Most recently added active products, newest first.
    pub fn new_arrivals(&self, limit: u32) -> ProductPage {
        let mut products: Vec<&Product> = self.products.iter().filter(|p| p.is_active).collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let products = products.into_iter().take(limit as usize).cloned().collect();
        single_page(products, limit)
    }

    /// Other products sharing the category or at least one tag.
    pub fn related(&self, id: &str, limit: u32) -> Result<ProductPage> {
        let source = self.product(id)?;
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.id != id && p.is_active)
            .filter(|p| {
                p.category == source.category || p.tags.iter().any(|t| source.tags.contains(t))
            })
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(single_page(products, limit))
    }

    pub fn create_product(&mut self, input: ProductInput) -> Result<Product> {
        validate_input(&input)?;
        let id = self.next_id().to_string();
        let now = Utc::now();
        let slug = input
            .slug
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| slugify(&input.name));

        let product = Product {
            sku: format!("SF-{:0>5}", id),
            id,
            slug,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            images: Vec::new(),
            sizes: input.sizes,
            colors: input.colors,
            stock_quantity: input.stock_quantity,
            tags: input.tags,
            is_active: true,
            featured: false,
            created_at: now,
            updated_at: now,
            average_rating: 0.0,
        };
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn update_product(&mut self, id: &str, input: ProductInput) -> Result<Product> {
        validate_input(&input)?;
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StorefrontError::NotFound(format!("Product '{}' not found", id)))?;

        if let Some(slug) = input.slug.filter(|s| !s.trim().is_empty()) {
            product.slug = slug;
        }
        product.name = input.name;
        product.description = input.description;
        product.price = input.price;
        product.category = input.category;
        product.sizes = input.sizes;
        product.colors = input.colors;
        product.stock_quantity = input.stock_quantity;
        product.tags = input.tags;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    /// Removes a product along with its reviews, cart lines and wishlist entry.
    pub fn delete_product(&mut self, id: &str) -> Result<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StorefrontError::NotFound(format!("Product '{}' not found", id)))?;
        let removed = self.products.remove(index);

        self.reviews.retain(|r| r.product_id != id);
        self.cart.retain(|item| item.product_id != id);
        self.wishlist.retain(|pid| pid != id);
        Ok(removed)
    }

    // == Categories ==

    /// Categories of active products with their counts, by name.
    pub fn categories(&self) -> Vec<Category> {
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for product in self.products.iter().filter(|p| p.is_active) {
            *counts.entry(product.category.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(name, product_count)| Category {
                name: name.to_string(),
                product_count,
            })
            .collect()
    }

    // == Reviews ==

    /// Reviews of a product, newest first.
    pub fn reviews(&self, product_id: &str) -> Result<Vec<Review>> {
        self.product(product_id)?;
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    /// Stores a review and re-averages the product's rating over its reviews.
    pub fn add_review(&mut self, product_id: &str, request: ReviewRequest) -> Result<Review> {
        if let Some(message) = request.validate() {
            return Err(StorefrontError::InvalidRequest(message));
        }
        self.product(product_id)?;

        let review = Review {
            id: format!("review_{}", self.next_id()),
            product_id: product_id.to_string(),
            rating: request.rating,
            comment: request.comment,
            created_at: Utc::now(),
        };
        self.reviews.push(review.clone());

        let average = average_rating(
            self.reviews
                .iter()
                .filter(|r| r.product_id == product_id)
                .map(|r| r.rating),
        );
        if let Some(product) = self.products.iter_mut().find(|p| p.id == product_id) {
            product.average_rating = average;
        }
        Ok(review)
    }

    // == Cart ==

    pub fn cart(&self) -> Cart {
        Cart::from_items(self.cart.clone())
    }

    /// Adds a line, or grows the quantity of an identical line.
    pub fn add_to_cart(&mut self, request: AddToCartRequest) -> Result<Cart> {
        if request.quantity == 0 {
            return Err(StorefrontError::InvalidRequest(
                "Quantity must be at least 1".to_string(),
            ));
        }
        let product = self.product(&request.product_id)?;
        if !product.is_purchasable() {
            return Err(StorefrontError::InvalidRequest(format!(
                "'{}' is not available",
                product.name
            )));
        }
        let (name, price) = (product.name.clone(), product.price);

        let existing = self.cart.iter_mut().find(|item| {
            item.product_id == request.product_id
                && item.size == request.size
                && item.color == request.color
        });
        match existing {
            Some(item) => item.quantity += request.quantity,
            None => {
                let id = format!("item_{}", self.next_id());
                self.cart.push(CartItem {
                    id,
                    product_id: request.product_id,
                    name,
                    price,
                    quantity: request.quantity,
                    size: request.size,
                    color: request.color,
                });
            }
        }
        Ok(self.cart())
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn update_cart_item(&mut self, item_id: &str, quantity: u32) -> Result<Cart> {
        let index = self.cart_index(item_id)?;
        if quantity == 0 {
            self.cart.remove(index);
        } else {
            self.cart[index].quantity = quantity;
        }
        Ok(self.cart())
    }

    pub fn remove_from_cart(&mut self, item_id: &str) -> Result<Cart> {
        let index = self.cart_index(item_id)?;
        self.cart.remove(index);
        Ok(self.cart())
    }

    pub fn clear_cart(&mut self) -> Cart {
        self.cart.clear();
        self.cart()
    }

    fn cart_index(&self, item_id: &str) -> Result<usize> {
        self.cart
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| StorefrontError::NotFound(format!("Cart item '{}' not found", item_id)))
    }

    // == Wishlist ==

    pub fn wishlist(&self) -> Wishlist {
        let products = self
            .wishlist
            .iter()
            .filter_map(|id| self.products.iter().find(|p| &p.id == id))
            .cloned()
            .collect();
        Wishlist { products }
    }

    pub fn add_to_wishlist(&mut self, product_id: &str) -> Result<Wishlist> {
        self.product(product_id)?;
        if !self.wishlist.iter().any(|id| id == product_id) {
            self.wishlist.push(product_id.to_string());
        }
        Ok(self.wishlist())
    }

    /// Removing a product that is not on the list is a no-op.
    pub fn remove_from_wishlist(&mut self, product_id: &str) -> Wishlist {
        self.wishlist.retain(|id| id != product_id);
        self.wishlist()
    }

    // == Checkout ==

    /// Places an order for `cart` and empties the stored cart.
    pub fn checkout(&mut self, cart: &Cart) -> Result<OrderConfirmation> {
        if cart.items.is_empty() {
            return Err(StorefrontError::InvalidRequest("Cart is empty".to_string()));
        }
        self.cart.clear();
        Ok(OrderConfirmation {
            order_id: format!("order_{}", current_timestamp_ms()),
        })
    }

    // == Accounts ==

    pub fn register(&mut self, request: &RegisterRequest) -> AuthResponse {
        if let Some(message) = request.validate() {
            let mut response = AuthResponse::failed(message.clone());
            response.errors.push(message);
            return response;
        }

        let email = normalize_email(&request.email);
        if self.accounts.contains_key(&email) {
            return AuthResponse::failed("An account with this email already exists");
        }

        let user = User {
            id: format!("user_{}", self.next_id()),
            email: email.clone(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            role: "customer".to_string(),
            auth_method: "password".to_string(),
        };
        self.accounts.insert(
            email,
            Account {
                user: user.clone(),
                password: request.password.clone(),
            },
        );
        AuthResponse::ok("Registration successful").with_user(user)
    }

    /// Checks credentials and opens a session on success.
    pub fn login(&mut self, request: &LoginRequest) -> AuthResponse {
        let email = normalize_email(&request.email);
        let user = match self.accounts.get(&email) {
            Some(account) if account.password == request.password => account.user.clone(),
            _ => return AuthResponse::failed("Invalid email or password"),
        };

        let tokens = self.issue_tokens(&email);
        AuthResponse::ok("Login successful")
            .with_user(user)
            .with_tokens(tokens)
    }

    pub fn logout(&mut self, access_token: Option<&str>) -> AuthResponse {
        if let Some(token) = access_token {
            self.sessions.remove(token);
        }
        AuthResponse::ok("Logged out")
    }

    /// User behind a live session token.
    pub fn user_for_token(&self, access_token: &str) -> Option<User> {
        let session = self
            .sessions
            .get(access_token)
            .filter(|s| s.expires_at > current_timestamp_ms())?;
        self.accounts
            .get(&session.email)
            .map(|account| account.user.clone())
    }

    /// Whether an account is registered under `email`, in any letter case.
    pub fn email_exists(&self, email: &str) -> bool {
        self.accounts.contains_key(&normalize_email(email))
    }

    /// Applies a profile edit to the user behind a live session.
    ///
    /// Only names are editable. A missing or expired session is `Unauthorized`.
    pub fn update_profile(
        &mut self,
        access_token: &str,
        update: &ProfileUpdate,
    ) -> Result<AuthResponse> {
        let email = self
            .sessions
            .get(access_token)
            .filter(|s| s.expires_at > current_timestamp_ms())
            .map(|s| s.email.clone())
            .ok_or_else(|| StorefrontError::Unauthorized("Session expired".to_string()))?;
        if let Some(message) = update.validate() {
            return Ok(AuthResponse::failed(message));
        }
        let account = self
            .accounts
            .get_mut(&email)
            .ok_or_else(|| StorefrontError::Unauthorized("Account no longer exists".to_string()))?;

        if let Some(first_name) = &update.first_name {
            account.user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = &update.last_name {
            account.user.last_name = last_name.trim().to_string();
        }
        Ok(AuthResponse::ok("Profile updated").with_user(account.user.clone()))
    }

    /// Exchanges a refresh token, once, for a new session.
    pub fn refresh(&mut self, refresh_token: &str) -> AuthResponse {
        match self.refresh_tokens.remove(refresh_token) {
            Some(email) if self.accounts.contains_key(&email) => {
                let tokens = self.issue_tokens(&email);
                AuthResponse::ok("Token refreshed").with_tokens(tokens)
            }
            _ => AuthResponse::failed("Invalid refresh token"),
        }
    }

    /// Always answers the same way for known and unknown addresses.
    pub fn reset_password(&self, email: &str) -> AuthResponse {
        if !email.contains('@') {
            return AuthResponse::failed("A valid email is required");
        }
        AuthResponse::ok("If an account exists for this email, a reset link has been sent")
    }

    /// Sets a new password and ends every session of that user.
    pub fn update_password(&mut self, request: &UpdatePasswordRequest) -> AuthResponse {
        if request.password.len() < 8 {
            return AuthResponse::failed("Password must be at least 8 characters");
        }
        let Some((email, account)) = self
            .accounts
            .iter_mut()
            .find(|(_, account)| account.user.id == request.user_id)
        else {
            return AuthResponse::failed("User not found");
        };

        account.password = request.password.clone();
        let email = email.clone();
        self.sessions.retain(|_, session| session.email != email);
        self.refresh_tokens.retain(|_, owner| *owner != email);
        AuthResponse::ok("Password updated")
    }

    fn issue_tokens(&mut self, email: &str) -> AuthTokens {
        let serial = self.next_id();
        let now = current_timestamp_ms();
        let expires_at = now + SESSION_LIFETIME_MS;
        let access_token = format!("sess_{}_{}", serial, now);
        let refresh_token = format!("refresh_{}_{}", serial, now);

        self.sessions.insert(
            access_token.clone(),
            Session {
                email: email.to_string(),
                expires_at,
            },
        );
        self.refresh_tokens
            .insert(refresh_token.clone(), email.to_string());

        AuthTokens {
            access_token,
            refresh_token: Some(refresh_token),
            expires_at,
        }
    }
}

/// Promo code lookup, case-insensitive.
pub fn promo_discount(code: &str) -> Option<PromoDiscount> {
    match code.trim().to_uppercase().as_str() {
        "SAVE10" => Some(PromoDiscount {
            discount: 10.0,
            kind: DiscountType::Percentage,
        }),
        "WELCOME" => Some(PromoDiscount {
            discount: 5.0,
            kind: DiscountType::Fixed,
        }),
        _ => None,
    }
}

fn single_page(products: Vec<Product>, limit: u32) -> ProductPage {
    let total = products.len() as u32;
    ProductPage {
        products,
        pagination: Pagination::new(1, limit.max(1), total),
    }
}

fn validate_input(input: &ProductInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(StorefrontError::InvalidRequest(
            "Product name is required".to_string(),
        ));
    }
    if input.category.trim().is_empty() {
        return Err(StorefrontError::InvalidRequest(
            "Product category is required".to_string(),
        ));
    }
    if !input.price.is_finite() || input.price < 0.0 {
        return Err(StorefrontError::InvalidRequest(
            "Price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Lowercase words joined by single hyphens.
fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

// == Seed Data ==

struct Seed {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    category: &'static str,
    image: &'static str,
    sizes: &'static [&'static str],
    color: &'static str,
    stock: u32,
    tags: &'static [&'static str],
    featured: bool,
    rating: f64,
}

const SEEDS: &[Seed] = &[
    Seed {
        slug: "classic-white-tee",
        name: "Classic White Essential Tee",
        description: "A timeless wardrobe staple crafted from premium 100% organic cotton. \
            This classic white tee features a comfortable relaxed fit, reinforced seams, and a \
            soft-touch finish that gets better with every wash.",
        price: 29.99,
        category: "essentials",
        image: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=800&h=1000&fit=crop",
        sizes: &["XS", "S", "M", "L", "XL", "2XL"],
        color: "white",
        stock: 50,
        tags: &["basics", "cotton", "everyday", "classic"],
        featured: true,
        rating: 4.8,
    },
    Seed {
        slug: "midnight-black-crew",
        name: "Midnight Black Crew Neck",
        description: "Sophisticated and versatile, this midnight black crew neck tee is \
            perfect for layering or wearing on its own. Made from a premium cotton blend with a \
            subtle matte finish.",
        price: 34.99,
        category: "essentials",
        image: "https://images.unsplash.com/photo-1503341504253-dff4815485f1?w=800&h=1000&fit=crop",
        sizes: &["S", "M", "L", "XL"],
        color: "black",
        stock: 42,
        tags: &["basics", "black", "crew-neck", "versatile"],
        featured: true,
        rating: 4.7,
    },
    Seed {
        slug: "sunset-orange-vintage",
        name: "Sunset Orange Vintage Wash",
        description: "Embrace retro vibes with this sunset orange tee featuring a unique \
            vintage wash treatment. Each piece is individually processed for a one-of-a-kind \
            look and feel.",
        price: 39.99,
        category: "vintage",
        image: "https://images.unsplash.com/photo-1583743814966-8936f37f4ec2?w=800&h=1000&fit=crop",
        sizes: &["S", "M", "L", "XL"],
        color: "orange",
        stock: 18,
        tags: &["vintage", "orange", "retro", "unique"],
        featured: false,
        rating: 4.6,
    },
    Seed {
        slug: "forest-green-organic",
        name: "Forest Green Organic Blend",
        description: "Sustainable fashion meets style in this forest green tee made from 100% \
            organic cotton. Featuring eco-friendly dyes and ethical manufacturing processes.",
        price: 42.99,
        category: "sustainable",
        image: "https://images.unsplash.com/photo-1564859228273-274232fdb516?w=800&h=1000&fit=crop",
        sizes: &["XS", "S", "M", "L", "XL"],
        color: "forest-green",
        stock: 36,
        tags: &["organic", "green", "sustainable", "eco-friendly"],
        featured: true,
        rating: 4.9,
    },
    Seed {
        slug: "navy-blue-premium",
        name: "Navy Blue Premium Fit",
        description: "Elevate your casual wardrobe with this navy blue premium tee. Features a \
            tailored fit, reinforced collar, and superior fabric that maintains its shape wash \
            after wash.",
        price: 37.99,
        category: "premium",
        image: "https://images.unsplash.com/photo-1571945153237-4929e783af4a?w=800&h=1000&fit=crop",
        sizes: &["S", "M", "L", "XL", "2XL"],
        color: "navy",
        stock: 24,
        tags: &["premium", "navy", "tailored", "quality"],
        featured: false,
        rating: 4.8,
    },
    Seed {
        slug: "charcoal-heather-soft",
        name: "Charcoal Heather Soft Touch",
        description: "Experience ultimate comfort with this charcoal heather tee featuring an \
            incredibly soft tri-blend fabric. Perfect for lounging or casual outings.",
        price: 32.99,
        category: "comfort",
        image: "https://images.unsplash.com/photo-1541099649105-f69ad21f3246?w=800&h=1000&fit=crop",
        sizes: &["XS", "S", "M", "L", "XL"],
        color: "charcoal",
        stock: 30,
        tags: &["soft", "charcoal", "comfort", "tri-blend"],
        featured: false,
        rating: 4.7,
    },
];

/// 2024-01-15T00:00:00Z, the first seed product's creation date.
const SEED_EPOCH_SECS: i64 = 1_705_276_800;

fn seed_products() -> Vec<Product> {
    let epoch = DateTime::<Utc>::from_timestamp(SEED_EPOCH_SECS, 0).unwrap_or_default();
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, seed)| {
            let id = (i + 1).to_string();
            let created_at = epoch + Duration::days(i as i64);
            Product {
                sku: format!("SF-{:0>5}", id),
                id,
                slug: seed.slug.to_string(),
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                price: seed.price,
                category: seed.category.to_string(),
                images: vec![seed.image.to_string()],
                sizes: seed.sizes.iter().map(|s| s.to_string()).collect(),
                colors: vec![seed.color.to_string()],
                stock_quantity: seed.stock,
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
                is_active: true,
                featured: seed.featured,
                created_at,
                updated_at: created_at,
                average_rating: seed.rating,
            }
        })
        .collect()
}
