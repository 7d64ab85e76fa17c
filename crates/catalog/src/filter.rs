//! Filter engine: predicate-based narrowing of the catalog.
//!
//! External parameters arrive as strings (query strings, form widgets). They are
//! normalized into a typed [`FilterParams`] first; malformed values are rejected
//! instead of being coerced.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ValueObject};

use crate::product::{MAX_RATING, Product};
use crate::sort::SortKey;

/// Category clause of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Empty and `"all"` both mean no restriction.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(raw.to_string())
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(c),
        }
    }
}

/// Typed filter parameters, built fresh for every pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    search: String,
    category: CategoryFilter,
    max_price: f64,
    min_rating: f64,
}

impl ValueObject for FilterParams {}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            max_price: f64::INFINITY,
            min_rating: 0.0,
        }
    }
}

impl FilterParams {
    /// Parameters that match every product.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(
        search: &str,
        category: CategoryFilter,
        max_price: f64,
        min_rating: f64,
    ) -> DomainResult<Self> {
        if max_price.is_nan() || max_price < 0.0 {
            return Err(DomainError::invalid_input("price must be a number >= 0"));
        }
        if !min_rating.is_finite() || !(0.0..=MAX_RATING).contains(&min_rating) {
            return Err(DomainError::invalid_input(format!(
                "rating must be a number between 0 and {MAX_RATING}"
            )));
        }
        Ok(Self {
            search: search.trim().to_lowercase(),
            category,
            max_price,
            min_rating,
        })
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.trim().to_lowercase();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_max_price(self, max_price: f64) -> DomainResult<Self> {
        Self::new(&self.search, self.category, max_price, self.min_rating)
    }

    pub fn with_min_rating(self, min_rating: f64) -> DomainResult<Self> {
        Self::new(&self.search, self.category, self.max_price, min_rating)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    /// Inclusion predicate; all clauses are AND-ed.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.search.is_empty() && !product.title.to_lowercase().contains(&self.search) {
            return false;
        }
        if let CategoryFilter::Only(category) = &self.category {
            if product.category != *category {
                return false;
            }
        }
        product.price <= self.max_price && product.rating.rate >= self.min_rating
    }
}

/// Stable filter: keeps input order and never mutates the catalog.
pub fn filter(catalog: &[Product], params: &FilterParams) -> Vec<Product> {
    catalog
        .iter()
        .filter(|p| params.matches(p))
        .cloned()
        .collect()
}

/// Untyped parameters as they arrive from a query string or input widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFilterParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl RawFilterParams {
    /// Parse and validate every field into typed parameters plus a sort key.
    pub fn normalize(&self) -> DomainResult<(FilterParams, SortKey)> {
        let search = self.search.as_deref().unwrap_or_default();
        let category = CategoryFilter::parse(self.category.as_deref().unwrap_or_default());
        let max_price = parse_number(self.price.as_deref(), "price")?.unwrap_or(f64::INFINITY);
        let min_rating = parse_number(self.rating.as_deref(), "rating")?.unwrap_or(0.0);
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => SortKey::Default,
            Some(key) => key.parse()?,
        };

        Ok((FilterParams::new(search, category, max_price, min_rating)?, sort))
    }
}

fn parse_number(raw: Option<&str>, field: &str) -> DomainResult<Option<f64>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(DomainError::invalid_input(format!(
            "{field} must be a number, got {raw:?}"
        ))),
    }
}
