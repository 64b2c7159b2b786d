//! Filter and sort engine
//!
//! `apply_filters` narrows the full product list dimension by dimension and
//! then sorts the survivors. Dimensions are AND-combined; the values inside a
//! list dimension (categories, colors, sizes) are OR-combined.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// Upper price bound of the reset filter state.
pub const DEFAULT_MAX_PRICE: f64 = 10_000.0;

// == Sort Key ==
/// Ordering applied to the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalogue order
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    Name,
    Rating,
    Newest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Name => "name",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }

    /// Parses a sort key, falling back to `Featured` for anything unknown.
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "featured" => Ok(SortKey::Featured),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "name" => Ok(SortKey::Name),
            "rating" => Ok(SortKey::Rating),
            "newest" => Ok(SortKey::Newest),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Availability ==
/// Stock-state selection for the availability dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    InStock,
    OutOfStock,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "in-stock",
            Availability::OutOfStock => "out-of-stock",
        }
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "in-stock" => Ok(Availability::InStock),
            "out-of-stock" => Ok(Availability::OutOfStock),
            other => Err(format!("unknown availability: {}", other)),
        }
    }
}

// == Filter State ==
/// Every filter dimension plus the sort key and search text.
///
/// List fields keep insertion order for display but match as sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub categories: Vec<String>,
    /// Inclusive `[min, max]`
    pub price_range: (f64, f64),
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    /// Minimum average rating; 0 disables the dimension
    pub rating: f64,
    pub availability: Vec<Availability>,
    pub sort_by: SortKey,
    pub search_query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            price_range: (0.0, DEFAULT_MAX_PRICE),
            colors: Vec::new(),
            sizes: Vec::new(),
            rating: 0.0,
            availability: Vec::new(),
            sort_by: SortKey::Featured,
            search_query: String::new(),
        }
    }
}

impl FilterState {
    /// Number of active selections, for a filter badge.
    ///
    /// Each selected category, color, size and availability counts once;
    /// a positive rating and a non-empty search count one each. Price range
    /// and sort are not counted.
    pub fn active_count(&self) -> usize {
        self.categories.len()
            + self.colors.len()
            + self.sizes.len()
            + self.availability.len()
            + usize::from(self.rating > 0.0)
            + usize::from(!self.search_query.is_empty())
    }

    /// Adds `value` to a list dimension, or removes it if already selected.
    ///
    /// Returns false when `value` is not a valid availability.
    pub fn toggle(&mut self, field: FilterField, value: &str) -> bool {
        match field {
            FilterField::Categories => toggle_in(&mut self.categories, value.to_string()),
            FilterField::Colors => toggle_in(&mut self.colors, value.to_string()),
            FilterField::Sizes => toggle_in(&mut self.sizes, value.to_string()),
            FilterField::Availability => match value.parse::<Availability>() {
                Ok(availability) => toggle_in(&mut self.availability, availability),
                Err(_) => return false,
            },
        }
        true
    }

    /// Overwrites the fields set in `update`, keeping the rest.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(categories) = update.categories {
            self.categories = categories;
        }
        if let Some(range) = update.price_range {
            self.price_range = range;
        }
        if let Some(colors) = update.colors {
            self.colors = colors;
        }
        if let Some(sizes) = update.sizes {
            self.sizes = sizes;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(availability) = update.availability {
            self.availability = availability;
        }
        if let Some(sort_by) = update.sort_by {
            self.sort_by = sort_by;
        }
        if let Some(query) = update.search_query {
            self.search_query = query;
        }
    }

    /// True if `product` passes every active dimension.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.matches_category(product)
            && self.matches_price(product)
            && any_selected(&self.colors, &product.colors)
            && any_selected(&self.sizes, &product.sizes)
            && self.matches_rating(product)
            && self.matches_availability(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        self.search_query.is_empty() || product.matches_query(&self.search_query.to_lowercase())
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.contains(&product.category)
    }

    fn matches_price(&self, product: &Product) -> bool {
        let (min, max) = self.price_range;
        product.price >= min && product.price <= max
    }

    fn matches_rating(&self, product: &Product) -> bool {
        self.rating <= 0.0 || product.average_rating >= self.rating
    }

    // Selecting both states excludes everything.
    fn matches_availability(&self, product: &Product) -> bool {
        if self.availability.contains(&Availability::InStock) && !product.in_stock() {
            return false;
        }
        if self.availability.contains(&Availability::OutOfStock) && product.in_stock() {
            return false;
        }
        true
    }
}

fn toggle_in<T: PartialEq>(values: &mut Vec<T>, value: T) {
    match values.iter().position(|v| *v == value) {
        Some(index) => {
            values.remove(index);
        }
        None => values.push(value),
    }
}

fn any_selected(selected: &[String], values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

// == Filter Field ==
/// The list-valued dimensions `toggle_filter` works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Categories,
    Colors,
    Sizes,
    Availability,
}

// == Filter Update ==
/// Partial filter state for `set_filters`; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub categories: Option<Vec<String>>,
    pub price_range: Option<(f64, f64)>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub availability: Option<Vec<Availability>>,
    pub sort_by: Option<SortKey>,
    pub search_query: Option<String>,
}

// == Apply ==
/// Recomputes the derived view from the full list.
///
/// Output products are clones of input products; nothing is invented.
pub fn apply_filters(products: &[Product], filters: &FilterState) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|product| filters.matches(product))
        .cloned()
        .collect();
    sort_products(&mut filtered, filters.sort_by);
    filtered
}

/// Stable sort by `key`; `Featured` leaves the order untouched.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Featured => {}
        SortKey::PriceLow => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Name => products.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::Rating => {
            products.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating))
        }
        SortKey::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

// Case-insensitive first so "apple" sorts with "Apple", then byte order as tie-break.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
