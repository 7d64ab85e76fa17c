//! Infrastructure layer: catalog sources and session-scoped cart storage.

pub mod catalog_source;
pub mod session_store;

pub use catalog_source::{
    CatalogFeed, CatalogSource, CatalogSourceError, FileCatalogSource, HttpCatalogSource,
};
pub use session_store::{DEFAULT_SESSION_IDLE_TIMEOUT, InMemorySessionCartStore, SessionCartStore};
