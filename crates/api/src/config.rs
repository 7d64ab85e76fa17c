//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CATALOG_PATH: &str = "products_cache.json";
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = storefront_infra::DEFAULT_SESSION_IDLE_TIMEOUT;

/// Where the catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSourceConfig {
    /// Local products cache file.
    File(PathBuf),
    /// Remote endpoint serving the `{ success, products }` envelope.
    Http(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub catalog: CatalogSourceConfig,
    /// Per-request limit for the HTTP catalog source.
    pub catalog_timeout: Duration,
    /// Carts untouched this long are evicted.
    pub session_idle_timeout: Duration,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    ///
    /// `STOREFRONT_CATALOG_URL` wins over `STOREFRONT_CATALOG_PATH` when both
    /// are set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = non_empty("STOREFRONT_BIND").unwrap_or_else(|| {
            tracing::warn!("STOREFRONT_BIND not set; using {DEFAULT_BIND_ADDR}");
            DEFAULT_BIND_ADDR.to_string()
        });
        let bind_addr = bind
            .trim()
            .parse()
            .with_context(|| format!("STOREFRONT_BIND is not a socket address: {bind:?}"))?;

        let catalog = match non_empty("STOREFRONT_CATALOG_URL") {
            Some(url) => CatalogSourceConfig::Http(url.trim().to_string()),
            None => {
                let path = non_empty("STOREFRONT_CATALOG_PATH").unwrap_or_else(|| {
                    tracing::warn!(
                        "STOREFRONT_CATALOG_PATH not set; using ./{DEFAULT_CATALOG_PATH}"
                    );
                    DEFAULT_CATALOG_PATH.to_string()
                });
                CatalogSourceConfig::File(PathBuf::from(path))
            }
        };

        let catalog_timeout = seconds(&non_empty, "STOREFRONT_CATALOG_TIMEOUT_SECS")?
            .unwrap_or(DEFAULT_CATALOG_TIMEOUT);
        let session_idle_timeout = seconds(&non_empty, "STOREFRONT_SESSION_IDLE_SECS")?
            .unwrap_or(DEFAULT_SESSION_IDLE_TIMEOUT);

        Ok(Self {
            bind_addr,
            catalog,
            catalog_timeout,
            session_idle_timeout,
        })
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> anyhow::Result<Option<Duration>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of seconds: {raw:?}"))?;
    if secs == 0 {
        anyhow::bail!("{key} must be greater than zero");
    }
    Ok(Some(Duration::from_secs(secs)))
}
