//! Product catalogue types
//!
//! The product shape shared by the client, the product store and the mock
//! backend, plus the listing query and pagination metadata.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock below this level is shown as "Only N left".
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A catalogue product.
///
/// Price is currency-agnostic. `stock_quantity` is unsigned, so the
/// non-negative stock invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub average_rating: f64,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// True when stock is on hand.
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// A product can be bought only when it is active and in stock.
    pub fn is_purchasable(&self) -> bool {
        self.is_active && self.in_stock()
    }

    pub fn stock_status(&self) -> StockStatus {
        if !self.is_active {
            StockStatus::Unavailable
        } else if self.stock_quantity == 0 {
            StockStatus::OutOfStock
        } else if self.stock_quantity < LOW_STOCK_THRESHOLD {
            StockStatus::LowStock(self.stock_quantity)
        } else {
            StockStatus::InStock
        }
    }

    /// Case-insensitive substring match against name, description or any tag.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Availability label shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    Unavailable,
    OutOfStock,
    /// Carries the remaining quantity
    LowStock(u32),
    InStock,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Unavailable => write!(f, "Unavailable"),
            StockStatus::OutOfStock => write!(f, "Out of Stock"),
            StockStatus::LowStock(left) => write!(f, "Only {} left", left),
            StockStatus::InStock => write!(f, "In Stock"),
        }
    }
}

/// Whole-percent markdown from `original_price` to `price`; 0 when there is none.
pub fn discount_percent(price: f64, original_price: f64) -> u32 {
    if original_price <= 0.0 || original_price <= price {
        return 0;
    }
    ((original_price - price) / original_price * 100.0).round() as u32
}

/// Page metadata returned alongside a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
}

impl Pagination {
    /// Computes page count for `total` items at `limit` per page.
    pub fn new(page: u32, limit: u32, total: u32) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 10, 0)
    }
}

/// Server-side sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Query parameters for `GET /api/products`.
///
/// Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    /// Matches products carrying any of these tags; comma-separated on the wire
    #[serde(default, with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

mod comma_separated {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&values.join(","))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl ProductQuery {
    /// Query for one page of the unfiltered listing.
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Renders `key=value&...` pairs in a fixed order, percent-encoding values.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if !self.tags.is_empty() {
            pairs.push(("tags", self.tags.join(",")));
        }
        if let Some(min) = self.min_price.filter(|m| *m != 0.0) {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price.filter(|m| *m != 0.0) {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(in_stock) = self.in_stock {
            pairs.push(("inStock", in_stock.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("sortBy", sort_by.to_string()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sortOrder", order.as_str().to_string()));
        }

        pairs
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, encode_component(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Form-style percent encoding (space becomes `+`).
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Body for creating or updating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}
