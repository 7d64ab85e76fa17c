use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use storefront_catalog::CatalogStore;

use super::{CatalogFeed, CatalogSource, CatalogSourceError};

/// Reads the product cache file (`products_cache.json`) on every fetch.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<CatalogStore, CatalogSourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    CatalogSourceError::NotFound("Products cache file not found".to_string())
                }
                _ => CatalogSourceError::Transport(format!("Unable to read products cache: {e}")),
            })?;

        let store = CatalogFeed::parse(&raw)?.into_store()?;
        tracing::debug!(path = %self.path.display(), count = store.len(), "catalog read from cache file");
        Ok(store)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("storefront-catalog-{}.json", uuid::Uuid::now_v7()))
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let source = FileCatalogSource::new(temp_path());
        assert!(matches!(source.fetch().await, Err(CatalogSourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn reads_cache_file_envelope() {
        let path = temp_path();
        tokio::fs::write(
            &path,
            r#"{"products":[
                {"id":2,"title":"Ring","price":900,"category":"jewelery","image":"r","rating":{"rate":3.0,"count":1}},
                {"id":1,"title":"Phone","price":10,"category":"electronics","image":"p","rating":{"rate":4.5,"count":9}}
            ]}"#,
        )
        .await
        .unwrap();

        let store = FileCatalogSource::new(&path).fetch().await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(store.len(), 2);
        assert_eq!(store.products()[0].title, "Ring");
    }

    #[tokio::test]
    async fn garbage_file_is_format_error() {
        let path = temp_path();
        tokio::fs::write(&path, "not json").await.unwrap();
        let result = FileCatalogSource::new(&path).fetch().await;
        let _ = tokio::fs::remove_file(&path).await;
        assert!(matches!(result, Err(CatalogSourceError::Format(_))));
    }
}
