//! Catalog retrieval: where the product list comes from.
//!
//! Sources only fetch and decode. Validation happens when the decoded products
//! are turned into a [`CatalogStore`], so every source rejects the same data.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use storefront_catalog::{CatalogStore, Product};

mod file;
mod http;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogSourceError {
    /// The cache file or remote resource does not exist.
    #[error("catalog source not found: {0}")]
    NotFound(String),

    /// Network/HTTP (or read) failure while fetching.
    #[error("catalog transport failure: {0}")]
    Transport(String),

    /// The payload could not be decoded or failed validation.
    #[error("invalid catalog data: {0}")]
    Format(String),
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch and validate the full catalog.
    async fn fetch(&self) -> Result<CatalogStore, CatalogSourceError>;

    /// Short description for logs (path or URL).
    fn describe(&self) -> String;
}

#[async_trait]
impl<S> CatalogSource for Arc<S>
where
    S: CatalogSource + ?Sized,
{
    async fn fetch(&self) -> Result<CatalogStore, CatalogSourceError> {
        (**self).fetch().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Accepted payload shapes: the API envelope (`{success, products, ..}`, also
/// used by the cache file) or a bare product array as served upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CatalogFeed {
    Envelope {
        #[serde(default)]
        success: Option<bool>,
        products: Vec<Product>,
        #[serde(default)]
        error: Option<String>,
    },
    Bare(Vec<Product>),
}

impl CatalogFeed {
    pub fn parse(raw: &str) -> Result<Self, CatalogSourceError> {
        serde_json::from_str(raw)
            .map_err(|e| CatalogSourceError::Format(format!("invalid catalog data format: {e}")))
    }

    pub fn into_store(self) -> Result<CatalogStore, CatalogSourceError> {
        let products = match self {
            CatalogFeed::Envelope {
                success: Some(false),
                error,
                ..
            } => {
                return Err(CatalogSourceError::Format(
                    error.unwrap_or_else(|| "catalog source reported failure".to_string()),
                ));
            }
            CatalogFeed::Envelope { products, .. } => products,
            CatalogFeed::Bare(products) => products,
        };

        CatalogStore::new(products).map_err(|e| CatalogSourceError::Format(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT: &str = r#"{"id":1,"title":"Phone","price":10,"category":"electronics","image":"i","rating":{"rate":4.5,"count":3}}"#;

    #[test]
    fn parses_envelope_and_bare_array() {
        let envelope = format!(r#"{{"success":true,"count":1,"products":[{PRODUCT}]}}"#);
        let store = CatalogFeed::parse(&envelope).unwrap().into_store().unwrap();
        assert_eq!(store.len(), 1);

        let cache_file = format!(r#"{{"products":[{PRODUCT}]}}"#);
        assert_eq!(CatalogFeed::parse(&cache_file).unwrap().into_store().unwrap().len(), 1);

        let bare = format!("[{PRODUCT}]");
        assert_eq!(CatalogFeed::parse(&bare).unwrap().into_store().unwrap().len(), 1);
    }

    #[test]
    fn failure_envelope_surfaces_its_error() {
        let raw = r#"{"success":false,"error":"Products cache file not found","count":0,"products":[]}"#;
        let err = CatalogFeed::parse(raw).unwrap().into_store().unwrap_err();
        assert_eq!(
            err,
            CatalogSourceError::Format("Products cache file not found".to_string())
        );
    }

    #[test]
    fn malformed_payloads_are_format_errors() {
        assert!(matches!(
            CatalogFeed::parse(r#"{"items":[]}"#),
            Err(CatalogSourceError::Format(_))
        ));
        let invalid = r#"[{"id":-1,"title":"x","price":1,"category":"c","image":"i","rating":{"rate":1,"count":1}}]"#;
        assert!(CatalogFeed::parse(invalid).is_err());
        let out_of_range = r#"[{"id":1,"title":"x","price":-5,"category":"c","image":"i","rating":{"rate":1,"count":1}}]"#;
        assert!(matches!(
            CatalogFeed::parse(out_of_range).unwrap().into_store(),
            Err(CatalogSourceError::Format(_))
        ));
    }
}
