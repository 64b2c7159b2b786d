//! Product fixtures for store tests

use chrono::{DateTime, Utc};

use crate::models::Product;

/// An active, stocked product with the given identity and price.
pub fn product(id: &str, name: &str, price: f64) -> Product {
    let created_at: DateTime<Utc> = "2024-01-15T00:00:00Z".parse().unwrap();
    Product {
        id: id.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        description: String::new(),
        price,
        category: "essentials".to_string(),
        images: Vec::new(),
        sizes: vec!["M".to_string()],
        colors: vec!["white".to_string()],
        stock_quantity: 10,
        sku: format!("SKU-{}", id),
        tags: Vec::new(),
        is_active: true,
        featured: false,
        created_at,
        updated_at: created_at,
        average_rating: 4.0,
    }
}
