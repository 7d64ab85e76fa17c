//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. Two filter parameter sets with the same
//! values describe the same narrowing of the catalog.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one (e.g. `FilterParams` is constructed fresh per pipeline run).
///
/// ## Value Object vs Entity
///
/// - **Value Object**: `Rating { rate: 4.5, count: 120 }`
/// - **Entity**: `Product { id: ProductId(7), .. }`
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
