//! Product Store Module
//!
//! Holds the product list and recomputes its filtered, sorted view whenever
//! the list or the filter criteria change.

mod facets;
mod filter;
mod product_store;

#[cfg(test)]
pub(crate) mod test_support;

pub use facets::{group_by_category, price_range, unique_values, Facet};
pub use filter::{
    apply_filters, sort_products, Availability, FilterField, FilterState, FilterUpdate, SortKey,
    DEFAULT_MAX_PRICE,
};
pub use product_store::{
    fetch_into, FetchTicket, ProductStore, SharedProductStore, UiPreferences, ViewMode,
    PREFERENCES_KEY, UNSUCCESSFUL_RESPONSE,
};
