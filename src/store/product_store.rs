//! Product Store
//!
//! Owns the canonical product list and the derived filtered/sorted view.
//! Every mutation of the list or of the filter state re-runs the full filter
//! pass synchronously; the view is never patched incrementally.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::filter::{apply_filters, FilterField, FilterState, FilterUpdate, SortKey};
use crate::client::ApiClient;
use crate::error::{Result, StorefrontError};
use crate::models::{Pagination, Product, ProductQuery, ProductsResponse};
use crate::persist::LocalStorage;

/// Storage key the UI preferences are saved under.
pub const PREFERENCES_KEY: &str = "product-store";

/// Message stored when the backend replies `success: false`.
pub const UNSUCCESSFUL_RESPONSE: &str = "API returned unsuccessful response";

/// Product grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// UI preferences; the only part of the store that is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferences {
    pub view_mode: ViewMode,
    pub show_filters: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Grid,
            show_filters: true,
        }
    }
}

/// Sequence number handed out by [`ProductStore::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Store handle shared between tasks.
pub type SharedProductStore = Arc<RwLock<ProductStore>>;

// == Product Store ==
#[derive(Debug, Clone)]
pub struct ProductStore {
    products: Vec<Product>,
    filtered_products: Vec<Product>,
    filters: FilterState,
    is_loading: bool,
    error: Option<String>,
    pagination: Pagination,
    preferences: UiPreferences,
    latest_fetch: u64,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            filtered_products: Vec::new(),
            filters: FilterState::default(),
            is_loading: false,
            error: None,
            pagination: Pagination::default(),
            preferences: UiPreferences::default(),
            latest_fetch: 0,
        }
    }

    /// Wraps a new store for sharing across tasks.
    pub fn shared() -> SharedProductStore {
        Arc::new(RwLock::new(Self::new()))
    }

    // == Accessors ==

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn filtered_products(&self) -> &[Product] {
        &self.filtered_products
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn preferences(&self) -> UiPreferences {
        self.preferences
    }

    // == Fetching ==

    /// Registers a new fetch and returns its ticket.
    ///
    /// Only the most recently issued ticket may apply its result.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        self.is_loading = true;
        self.error = None;
        FetchTicket(self.latest_fetch)
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    ///
    /// Returns false, changing nothing, when a newer fetch has been issued
    /// since. On failure the error text is stored and the previous products
    /// are kept.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<ProductsResponse>) -> bool {
        if ticket.0 != self.latest_fetch {
            debug!(
                ticket = ticket.0,
                latest = self.latest_fetch,
                "discarding stale product response"
            );
            return false;
        }

        self.is_loading = false;
        let page = result.and_then(|response| {
            if response.success {
                response.into_data()
            } else {
                Err(StorefrontError::Unsuccessful(
                    UNSUCCESSFUL_RESPONSE.to_string(),
                ))
            }
        });

        match page {
            Ok(page) => {
                self.products = page.products;
                self.pagination = page.pagination;
                self.apply_filters();
            }
            Err(err) => {
                warn!(error = %err, "product fetch failed");
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Fetches one page through `client` and applies it.
    pub async fn fetch_products(&mut self, client: &ApiClient, page: u32, limit: u32) -> bool {
        let ticket = self.begin_fetch();
        let result = client.get_products(&ProductQuery::page(page, limit)).await;
        self.complete_fetch(ticket, result)
    }

    // == Mutations ==

    /// Replaces the product list.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.apply_filters();
    }

    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.filters.merge(update);
        self.apply_filters();
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
        self.apply_filters();
    }

    /// Toggles `value` in a list dimension. An unknown availability value is ignored.
    pub fn toggle_filter(&mut self, field: FilterField, value: &str) {
        if !self.filters.toggle(field, value) {
            warn!(?field, value, "ignoring unknown filter value");
        }
        self.apply_filters();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filters.search_query = query.into();
        self.apply_filters();
    }

    pub fn set_sort_by(&mut self, sort_by: SortKey) {
        self.filters.sort_by = sort_by;
        self.apply_filters();
    }

    /// Recomputes the filtered view from the full product list.
    pub fn apply_filters(&mut self) {
        self.filtered_products = apply_filters(&self.products, &self.filters);
    }

    pub fn active_filters_count(&self) -> usize {
        self.filters.active_count()
    }

    // == Preferences ==

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.preferences.view_mode = mode;
    }

    pub fn toggle_show_filters(&mut self) {
        self.preferences.show_filters = !self.preferences.show_filters;
    }

    /// Restores preferences saved by `save_preferences`, keeping defaults if none exist.
    pub fn load_preferences(&mut self, storage: &LocalStorage) -> Result<()> {
        if let Some(preferences) = storage.get_item::<UiPreferences>(PREFERENCES_KEY)? {
            self.preferences = preferences;
        }
        Ok(())
    }

    pub fn save_preferences(&self, storage: &LocalStorage) -> Result<()> {
        storage.set_item(PREFERENCES_KEY, &self.preferences)
    }
}

/// Fetches into a shared store without holding its lock across the request.
///
/// Concurrent calls may finish in any order; only the last one started
/// applies its result.
pub async fn fetch_into(
    store: &SharedProductStore,
    client: &ApiClient,
    page: u32,
    limit: u32,
) -> bool {
    let ticket = store.write().await.begin_fetch();
    let result = client.get_products(&ProductQuery::page(page, limit)).await;
    store.write().await.complete_fetch(ticket, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiResponse, ProductPage};
    use crate::store::test_support::product;
    use crate::store::Availability;

    fn page_of(products: Vec<Product>) -> ProductsResponse {
        let total = products.len() as u32;
        ApiResponse::ok(ProductPage {
            products,
            pagination: Pagination::new(1, 10, total),
        })
    }

    fn stocked_store() -> ProductStore {
        let mut store = ProductStore::new();
        store.set_products(vec![
            product("1", "Classic White Tee", 49.0),
            product("2", "Midnight Black Crew", 39.0),
            product("3", "Sunset Orange Vintage", 45.0),
        ]);
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = ProductStore::new();
        assert!(store.products().is_empty());
        assert!(store.filtered_products().is_empty());
        assert!(!store.is_loading());
        assert!(store.error().is_none());
        assert_eq!(store.preferences(), UiPreferences::default());
    }

    #[test]
    fn test_set_products_recomputes_view() {
        let store = stocked_store();
        assert_eq!(store.filtered_products().len(), 3);
    }

    #[test]
    fn test_mutations_recompute_view() {
        let mut store = stocked_store();

        store.set_search_query("white");
        assert_eq!(store.filtered_products().len(), 1);

        store.set_search_query("");
        store.set_sort_by(SortKey::PriceLow);
        let prices: Vec<f64> = store.filtered_products().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![39.0, 45.0, 49.0]);

        store.set_filters(FilterUpdate {
            price_range: Some((40.0, 50.0)),
            ..FilterUpdate::default()
        });
        assert_eq!(store.filtered_products().len(), 2);

        store.reset_filters();
        assert_eq!(store.filtered_products(), store.products());
    }

    #[test]
    fn test_toggle_filter_availability() {
        let mut store = stocked_store();
        let mut products = store.products().to_vec();
        products[0].stock_quantity = 0;
        store.set_products(products);

        store.toggle_filter(FilterField::Availability, "out-of-stock");
        assert_eq!(store.filtered_products().len(), 1);
        assert_eq!(store.filtered_products()[0].id, "1");
        assert_eq!(store.filters().availability, vec![Availability::OutOfStock]);

        store.toggle_filter(FilterField::Availability, "out-of-stock");
        assert_eq!(store.filtered_products().len(), 3);
    }

    #[test]
    fn test_active_filters_count() {
        let mut store = stocked_store();
        store.toggle_filter(FilterField::Categories, "essentials");
        store.toggle_filter(FilterField::Sizes, "M");
        store.set_search_query("tee");
        assert_eq!(store.active_filters_count(), 3);
    }

    #[test]
    fn test_complete_fetch_success() {
        let mut store = ProductStore::new();
        let ticket = store.begin_fetch();
        assert!(store.is_loading());

        let applied = store.complete_fetch(ticket, Ok(page_of(vec![product("1", "a", 1.0)])));

        assert!(applied);
        assert!(!store.is_loading());
        assert_eq!(store.products().len(), 1);
        assert_eq!(store.filtered_products().len(), 1);
        assert_eq!(store.pagination().total, 1);
    }

    #[test]
    fn test_complete_fetch_failure_keeps_products() {
        let mut store = stocked_store();
        let ticket = store.begin_fetch();

        store.complete_fetch(ticket, Err(StorefrontError::Http { status: 500 }));

        assert_eq!(store.error(), Some("HTTP error! status: 500"));
        assert_eq!(store.products().len(), 3);
        assert!(!store.is_loading());
    }

    #[test]
    fn test_complete_fetch_unsuccessful_flag() {
        let mut store = ProductStore::new();
        let ticket = store.begin_fetch();

        store.complete_fetch(ticket, Ok(ApiResponse::failure("db down")));

        assert_eq!(store.error(), Some(UNSUCCESSFUL_RESPONSE));
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut store = ProductStore::new();
        let older = store.begin_fetch();
        let newer = store.begin_fetch();
        assert!(older < newer);

        assert!(store.complete_fetch(newer, Ok(page_of(vec![product("2", "new", 1.0)]))));
        assert!(!store.complete_fetch(older, Ok(page_of(vec![product("1", "old", 1.0)]))));

        assert_eq!(store.products()[0].name, "new");
    }

    #[test]
    fn test_begin_fetch_clears_error() {
        let mut store = ProductStore::new();
        let ticket = store.begin_fetch();
        store.complete_fetch(ticket, Err(StorefrontError::Http { status: 502 }));
        assert!(store.error().is_some());

        store.begin_fetch();
        assert!(store.error().is_none());
    }

    #[test]
    fn test_preferences_toggle() {
        let mut store = ProductStore::new();
        store.set_view_mode(ViewMode::List);
        store.toggle_show_filters();

        assert_eq!(
            store.preferences(),
            UiPreferences {
                view_mode: ViewMode::List,
                show_filters: false,
            }
        );
    }

    #[test]
    fn test_preferences_round_trip_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let mut store = ProductStore::new();
        store.set_view_mode(ViewMode::List);
        store.save_preferences(&storage).unwrap();

        let mut restored = stocked_store();
        restored.load_preferences(&storage).unwrap();
        assert_eq!(restored.preferences().view_mode, ViewMode::List);
        // Product and filter state are not part of what is persisted
        assert_eq!(restored.products().len(), 3);
    }
}
