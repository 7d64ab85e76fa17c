//! Common surface over both cart variants.

use storefront_catalog::Product;
use storefront_core::{DomainError, DomainResult};

use crate::ledger::{AddItem, CartLedger};
use crate::snapshot::{KeyValueStore, SnapshotCart};

/// A cart the browsing session can add to.
pub trait Cart: Send {
    /// Add `qty` of `product` (non-positive means 1); returns the new total.
    fn add(&mut self, product: &Product, qty: i64) -> DomainResult<u64>;

    /// Running total shown in the header badge.
    fn total_count(&self) -> u64;
}

impl Cart for CartLedger {
    fn add(&mut self, product: &Product, qty: i64) -> DomainResult<u64> {
        self.add_to_cart(product.id.get() as i64, qty)
    }

    fn total_count(&self) -> u64 {
        CartLedger::total_count(self)
    }
}

/// One snapshot per unit, so the count still reads as a quantity.
impl<S: KeyValueStore> Cart for SnapshotCart<S> {
    fn add(&mut self, product: &Product, qty: i64) -> DomainResult<u64> {
        let units = AddItem::new(product.id.get() as i64, qty)?.quantity;
        let units = usize::try_from(units)
            .map_err(|_| DomainError::invalid_input("quantity too large"))?;
        let count = self.push_many(product.clone(), units)?;
        Ok(count as u64)
    }

    fn total_count(&self) -> u64 {
        self.count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::InMemoryKeyValueStore;
    use storefront_catalog::Rating;
    use storefront_core::{ProductId, SessionId};

    fn phone() -> Product {
        Product {
            id: ProductId::new(1).unwrap(),
            title: "Phone".into(),
            category: "electronics".into(),
            price: 10.0,
            rating: Rating { rate: 4.5, count: 2 },
            image: String::new(),
            description: None,
        }
    }

    fn add_twice(cart: &mut dyn Cart) -> u64 {
        cart.add(&phone(), 1).unwrap();
        cart.add(&phone(), 2).unwrap()
    }

    #[test]
    fn both_variants_report_the_same_total() {
        let mut ledger = CartLedger::empty(SessionId::new());
        let mut snapshots = SnapshotCart::load(InMemoryKeyValueStore::new());
        assert_eq!(add_twice(&mut ledger), 3);
        assert_eq!(add_twice(&mut snapshots), 3);
        assert_eq!(Cart::total_count(&ledger), Cart::total_count(&snapshots));
    }

    #[test]
    fn large_quantity_is_added_in_one_write() {
        let store = std::sync::Arc::new(InMemoryKeyValueStore::new());
        let mut snapshots = SnapshotCart::load(store.clone());
        assert_eq!(snapshots.add(&phone(), 50_000).unwrap(), 50_000);
        assert_eq!(SnapshotCart::load(store).count(), 50_000);
    }
}
