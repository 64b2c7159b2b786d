//! Sidebar facets
//!
//! Values the filter sidebar offers, read off whatever product list it is
//! given.

use std::collections::BTreeMap;

use super::filter::DEFAULT_MAX_PRICE;
use crate::models::Product;

/// Product attribute a facet is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Category,
    Color,
    Size,
    Tag,
}

/// Distinct values of `facet`, in first-seen order.
pub fn unique_values(products: &[Product], facet: Facet) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for product in products {
        let candidates: &[String] = match facet {
            Facet::Category => std::slice::from_ref(&product.category),
            Facet::Color => &product.colors,
            Facet::Size => &product.sizes,
            Facet::Tag => &product.tags,
        };
        for value in candidates {
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
    }
    values
}

/// Lowest and highest price; `(0, DEFAULT_MAX_PRICE)` for an empty list.
pub fn price_range(products: &[Product]) -> (f64, f64) {
    if products.is_empty() {
        return (0.0, DEFAULT_MAX_PRICE);
    }
    products
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
            (min.min(p.price), max.max(p.price))
        })
}

/// Products keyed by category name, each group in list order.
pub fn group_by_category(products: &[Product]) -> BTreeMap<String, Vec<Product>> {
    let mut groups: BTreeMap<String, Vec<Product>> = BTreeMap::new();
    for product in products {
        groups
            .entry(product.category.clone())
            .or_default()
            .push(product.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::product;

    fn catalogue() -> Vec<Product> {
        let mut tee = product("1", "Tee", 29.99);
        tee.colors = vec!["white".to_string(), "black".to_string()];
        tee.sizes = vec!["S".to_string(), "M".to_string()];

        let mut wash = product("2", "Wash", 39.99);
        wash.category = "vintage".to_string();
        wash.colors = vec!["orange".to_string(), "white".to_string()];
        wash.sizes = vec!["M".to_string(), "L".to_string()];

        let crew = product("3", "Crew", 24.5);
        vec![tee, wash, crew]
    }

    #[test]
    fn test_unique_values_first_seen_order() {
        let products = catalogue();
        assert_eq!(
            unique_values(&products, Facet::Category),
            vec!["essentials", "vintage"]
        );
        assert_eq!(
            unique_values(&products, Facet::Color),
            vec!["white", "black", "orange"]
        );
        assert_eq!(unique_values(&products, Facet::Size), vec!["S", "M", "L"]);
        assert!(unique_values(&[], Facet::Tag).is_empty());
    }

    #[test]
    fn test_price_range() {
        assert_eq!(price_range(&catalogue()), (24.5, 39.99));
        assert_eq!(price_range(&[product("1", "Only", 12.0)]), (12.0, 12.0));
    }

    #[test]
    fn test_price_range_empty_uses_default_bounds() {
        assert_eq!(price_range(&[]), (0.0, 10_000.0));
    }

    #[test]
    fn test_group_by_category() {
        let groups = group_by_category(&catalogue());
        assert_eq!(groups.len(), 2);

        let essentials: Vec<&str> = groups["essentials"].iter().map(|p| p.id.as_str()).collect();
        assert_eq!(essentials, vec!["1", "3"]);
        assert_eq!(groups["vintage"].len(), 1);
        assert!(group_by_category(&[]).is_empty());
    }
}
