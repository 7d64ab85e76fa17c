use std::time::Duration;

use async_trait::async_trait;

use storefront_catalog::CatalogStore;

use super::{CatalogFeed, CatalogSource, CatalogSourceError};

/// Fetches the catalog over HTTP (the storefront API or an upstream feed).
///
/// No retries: a failed fetch is reported once and the caller keeps whatever
/// catalog it already had.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

/// Upper bound for one fetch, connect through body.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Result<Self, CatalogSourceError> {
        Self::with_timeout(url, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogSourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogSourceError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<CatalogStore, CatalogSourceError> {
        let res = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = res.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogSourceError::NotFound(self.url.clone()));
        }
        if !status.is_success() {
            // Failure envelopes still carry a useful `error` message.
            let body = res.text().await.unwrap_or_default();
            let detail = CatalogFeed::parse(&body)
                .ok()
                .and_then(|feed| match feed {
                    CatalogFeed::Envelope { error, .. } => error,
                    CatalogFeed::Bare(_) => None,
                })
                .unwrap_or_default();
            return Err(CatalogSourceError::Transport(
                format!("HTTP error! status: {status} {detail}").trim_end().to_string(),
            ));
        }

        let body = res.text().await.map_err(transport_error)?;
        let store = CatalogFeed::parse(&body)?.into_store()?;
        tracing::debug!(url = %self.url, count = store.len(), "catalog fetched over http");
        Ok(store)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

fn transport_error(e: reqwest::Error) -> CatalogSourceError {
    if e.is_timeout() {
        CatalogSourceError::Transport(format!("request timed out: {e}"))
    } else {
        CatalogSourceError::Transport(e.to_string())
    }
}
