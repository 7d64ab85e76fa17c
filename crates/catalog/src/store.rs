//! In-memory catalog for the current session/request.

use std::collections::HashSet;
use std::sync::Arc;

use storefront_core::{DomainError, DomainResult, ProductId};

use crate::product::Product;

/// Validated, immutable product list.
///
/// Cloning is cheap (shared slice); filtered and sorted views are always new
/// vectors and never touch the stored sequence.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Arc<[Product]>,
}

impl CatalogStore {
    /// Build a store from fetched products, rejecting out-of-range values and
    /// duplicate ids.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id) {
                return Err(DomainError::invariant(format!(
                    "duplicate product id {} in catalog",
                    product.id
                )));
            }
        }

        tracing::debug!(count = products.len(), "catalog store loaded");
        Ok(Self {
            products: products.into(),
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter(|p| seen.insert(p.category.as_str()))
            .map(|p| p.category.clone())
            .collect()
    }
}
