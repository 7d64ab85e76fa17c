//! Cart domain module.
//!
//! Two variants of the shopping cart:
//! - [`CartLedger`]: productId → quantity, the server-session cart.
//! - [`SnapshotCart`]: an append-only list of product copies persisted in a
//!   key-value store, the browser-local cart.

pub mod backend;
pub mod ledger;
pub mod snapshot;

pub use backend::Cart;
pub use ledger::{AddItem, CartCommand, CartEvent, CartLedger, CartLine};
pub use snapshot::{CART_STORAGE_KEY, InMemoryKeyValueStore, KeyValueStore, SnapshotCart};
