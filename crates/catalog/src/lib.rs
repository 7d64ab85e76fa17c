//! Catalog domain module.
//!
//! Product model, the in-memory catalog store, and the pure filter/sort engines
//! that derive views from it (no IO, no HTTP, no storage).

pub mod filter;
pub mod product;
pub mod sort;
pub mod store;

pub use filter::{CategoryFilter, FilterParams, RawFilterParams, filter};
pub use product::{Product, Rating};
pub use sort::{SortKey, sort};
pub use store::CatalogStore;
