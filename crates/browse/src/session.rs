//! Explicit browsing-session context.
//!
//! Holds everything the page used to keep in globals: the fetched catalog, the
//! cart and the current widget values. Created at session start, dropped at
//! session end.

use storefront_cart::Cart;
use storefront_catalog::{CatalogStore, RawFilterParams, filter, sort};
use storefront_core::{DomainError, DomainResult, ProductId};

use crate::config::BrowseConfig;
use crate::view::{CatalogView, ResultsSummary};

/// Raw widget values, exactly as the inputs hold them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInputs {
    pub search: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    pub sort: String,
}

impl FilterInputs {
    /// Initial/reset position of every control.
    pub fn reset(config: &BrowseConfig) -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            price: config.price_slider_max.to_string(),
            rating: String::new(),
            sort: "default".to_string(),
        }
    }

    pub fn to_raw(&self) -> RawFilterParams {
        RawFilterParams {
            search: Some(self.search.clone()),
            category: Some(self.category.clone()),
            price: Some(self.price.clone()),
            rating: Some(self.rating.clone()),
            sort: Some(self.sort.clone()),
        }
    }
}

#[derive(Debug)]
pub struct BrowseSession<C> {
    catalog: CatalogStore,
    cart: C,
    inputs: FilterInputs,
    config: BrowseConfig,
}

impl<C: Cart> BrowseSession<C> {
    /// Start a session with an empty catalog (not loaded yet).
    pub fn new(cart: C, config: BrowseConfig) -> Self {
        Self {
            catalog: CatalogStore::empty(),
            cart,
            inputs: FilterInputs::reset(&config),
            config,
        }
    }

    pub fn with_catalog(mut self, catalog: CatalogStore) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn replace_catalog(&mut self, catalog: CatalogStore) {
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &C {
        &self.cart
    }

    pub fn inputs(&self) -> &FilterInputs {
        &self.inputs
    }

    pub fn config(&self) -> &BrowseConfig {
        &self.config
    }

    pub fn set_search(&mut self, text: &str) {
        self.inputs.search = text.to_string();
    }

    /// Escape in the search box.
    pub fn clear_search(&mut self) {
        self.inputs.search.clear();
    }

    pub fn set_category(&mut self, category: &str) {
        self.inputs.category = category.to_string();
    }

    pub fn set_max_price(&mut self, price: &str) {
        self.inputs.price = price.to_string();
    }

    pub fn set_min_rating(&mut self, rating: &str) {
        self.inputs.rating = rating.to_string();
    }

    pub fn set_sort(&mut self, key: &str) {
        self.inputs.sort = key.to_string();
    }

    pub fn reset_filters(&mut self) {
        self.inputs = FilterInputs::reset(&self.config);
    }

    /// Category selector options.
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    /// Capture inputs → normalize → filter → sort.
    ///
    /// Read-only: the catalog is never reordered or narrowed in place.
    pub fn refresh(&self) -> DomainResult<CatalogView> {
        let (params, key) = self.inputs.to_raw().normalize()?;
        let filtered = filter(self.catalog.products(), &params);
        let products = sort(&filtered, key);
        let summary =
            ResultsSummary::describe(&self.inputs.search, &self.inputs.category, products.len());

        tracing::debug!(
            total = self.catalog.len(),
            shown = products.len(),
            sort = %key,
            "catalog view refreshed"
        );

        Ok(CatalogView {
            products,
            sort: key,
            summary,
        })
    }

    /// Add a catalog product to the cart; returns the new total.
    ///
    /// Unknown ids are rejected and leave the cart unchanged.
    pub fn add_to_cart(&mut self, product_id: i64, qty: i64) -> DomainResult<u64> {
        let id = ProductId::new(product_id)?;
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| DomainError::not_found(format!("product {id} is not in the catalog")))?;
        self.cart.add(product, qty)
    }

    pub fn cart_total(&self) -> u64 {
        self.cart.total_count()
    }
}
