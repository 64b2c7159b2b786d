//! Account, category, review, cart, wishlist and checkout types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Product;

/// A registered shopper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_auth_method")]
    pub auth_method: String,
}

fn default_role() -> String {
    "customer".to_string()
}

fn default_auth_method() -> String {
    "password".to_string()
}

/// A product category with its product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub product_count: u32,
}

/// A product review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Mean of star ratings rounded to one decimal; 0 when there are none.
pub fn average_rating<I: IntoIterator<Item = u8>>(ratings: I) -> f64 {
    let (sum, count) = ratings
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), r| (sum + r as u32, count + 1));
    if count == 0 {
        return 0.0;
    }
    (sum as f64 / count as f64 * 10.0).round() / 10.0
}

/// A line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Shopping cart with derived totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub items_count: u32,
}

impl Cart {
    /// Builds a cart, computing subtotal and item count from the lines.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let subtotal = items.iter().map(CartItem::line_total).sum();
        let items_count = items.iter().map(|item| item.quantity).sum();
        Self {
            items,
            subtotal,
            items_count,
        }
    }
}

/// Products the shopper saved for later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    pub products: Vec<Product>,
}

/// How a promo code discounts an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Result of validating a promo code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromoDiscount {
    pub discount: f64,
    #[serde(rename = "type")]
    pub kind: DiscountType,
}

impl PromoDiscount {
    /// Amount taken off `subtotal`, never more than the subtotal itself.
    pub fn amount_off(&self, subtotal: f64) -> f64 {
        let off = match self.kind {
            DiscountType::Percentage => subtotal * self.discount / 100.0,
            DiscountType::Fixed => self.discount,
        };
        off.min(subtotal).max(0.0)
    }
}

/// Confirmation of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,
}
