//! Browser-local cart: product snapshots kept under a fixed storage key.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use storefront_catalog::Product;
use storefront_core::{DomainError, DomainResult};

/// Storage key the snapshot list lives under.
pub const CART_STORAGE_KEY: &str = "cart";

/// String key/value persistence (browser local storage and friends).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`; an error means nothing was written.
    fn set(&self, key: &str, value: String) -> DomainResult<()>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> DomainResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) -> DomainResult<()> {
        let mut map = self.inner.write().map_err(|_| {
            tracing::error!(key, "key-value store lock poisoned; write dropped");
            DomainError::invariant("key-value store lock poisoned")
        })?;
        map.insert(key.to_string(), value);
        Ok(())
    }
}

/// Append-only list of previously added products.
///
/// Snapshots are copies, so later catalog changes do not rewrite the cart.
/// The count is the number of snapshots, duplicates included.
#[derive(Debug)]
pub struct SnapshotCart<S> {
    store: S,
    items: Vec<Product>,
}

impl<S: KeyValueStore> SnapshotCart<S> {
    /// Re-read the persisted list; missing or unreadable state starts empty.
    pub fn load(store: S) -> Self {
        let items = match store.get(CART_STORAGE_KEY) {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<Product>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "discarding unreadable stored cart");
                Vec::new()
            }),
        };
        Self { store, items }
    }

    /// Append a snapshot and persist the whole list; returns the new count.
    pub fn push(&mut self, product: Product) -> DomainResult<usize> {
        self.push_many(product, 1)
    }

    /// Append `units` copies of `product` with a single write.
    ///
    /// On a failed write the list is truncated back to its previous length.
    pub fn push_many(&mut self, product: Product, units: usize) -> DomainResult<usize> {
        let before = self.items.len();
        self.items.extend(std::iter::repeat_n(product, units));
        if let Err(e) = self.persist() {
            self.items.truncate(before);
            return Err(e);
        }
        Ok(self.items.len())
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    fn persist(&self) -> DomainResult<()> {
        let json = serde_json::to_string(&self.items)
            .map_err(|e| DomainError::invariant(format!("cart serialization failed: {e}")))?;
        self.store.set(CART_STORAGE_KEY, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::Rating;
    use storefront_core::ProductId;

    fn product(id: i64, title: &str) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            title: title.to_string(),
            category: "electronics".to_string(),
            price: 10.0,
            rating: Rating { rate: 4.0, count: 3 },
            image: String::new(),
            description: None,
        }
    }

    #[test]
    fn load_from_empty_store_starts_empty() {
        let cart = SnapshotCart::load(InMemoryKeyValueStore::new());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn push_persists_and_survives_reload() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut cart = SnapshotCart::load(store.clone());
        assert_eq!(cart.push(product(1, "Phone")).unwrap(), 1);
        assert_eq!(cart.push(product(1, "Phone")).unwrap(), 2);
        assert_eq!(cart.push(product(2, "Ring")).unwrap(), 3);

        let reloaded = SnapshotCart::load(store);
        assert_eq!(reloaded.count(), 3);
        assert_eq!(reloaded.items()[2].title, "Ring");
    }

    #[test]
    fn malformed_stored_cart_is_discarded() {
        let store = InMemoryKeyValueStore::new();
        store.set(CART_STORAGE_KEY, "{not json".to_string()).unwrap();
        let cart = SnapshotCart::load(store);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn push_many_writes_once_and_counts_every_unit() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut cart = SnapshotCart::load(store.clone());
        cart.push(product(1, "Phone")).unwrap();
        assert_eq!(cart.push_many(product(2, "Ring"), 3).unwrap(), 4);

        let reloaded = SnapshotCart::load(store);
        assert_eq!(reloaded.count(), 4);
        assert!(reloaded.items()[1..].iter().all(|p| p.title == "Ring"));
    }

    #[test]
    fn failed_write_rolls_back_and_reports_the_error() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut cart = SnapshotCart::load(store.clone());
        cart.push(product(1, "Phone")).unwrap();

        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the store lock");
        })
        .join();

        assert!(matches!(
            cart.push_many(product(2, "Ring"), 5),
            Err(DomainError::InvariantViolation(_))
        ));
        assert_eq!(cart.count(), 1);
        assert!(store.set(CART_STORAGE_KEY, "[]".to_string()).is_err());
    }

    #[test]
    fn stored_format_is_a_json_array_of_products() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut cart = SnapshotCart::load(store.clone());
        cart.push(product(7, "Lamp")).unwrap();

        let raw = store.get(CART_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], 7);
        assert_eq!(value[0]["title"], "Lamp");
    }
}
