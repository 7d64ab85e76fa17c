use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use storefront_cart::{AddItem, CartCommand, CartLedger};
use storefront_catalog::CatalogStore;
use storefront_core::{Aggregate, DomainResult, SessionId};
use storefront_infra::{
    CatalogSource, CatalogSourceError, FileCatalogSource, HttpCatalogSource,
    InMemorySessionCartStore, SessionCartStore,
};

use crate::config::{ApiConfig, CatalogSourceConfig};

/// Shared handles the routes work against.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<dyn CatalogSource>,
    carts: Arc<dyn SessionCartStore>,
}

impl AppServices {
    pub fn new(catalog: Arc<dyn CatalogSource>, carts: Arc<dyn SessionCartStore>) -> Self {
        Self { catalog, carts }
    }

    /// Catalog from `source`, carts kept in process memory.
    pub fn in_memory(catalog: Arc<dyn CatalogSource>) -> Self {
        Self::new(catalog, Arc::new(InMemorySessionCartStore::new()))
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, CatalogSourceError> {
        let catalog: Arc<dyn CatalogSource> = match &config.catalog {
            CatalogSourceConfig::File(path) => Arc::new(FileCatalogSource::new(path.clone())),
            CatalogSourceConfig::Http(url) => Arc::new(HttpCatalogSource::with_timeout(
                url.clone(),
                config.catalog_timeout,
            )?),
        };
        tracing::info!(source = %catalog.describe(), "catalog source configured");
        let carts = Arc::new(InMemorySessionCartStore::with_idle_timeout(
            config.session_idle_timeout,
        ));
        Ok(Self::new(catalog, carts))
    }

    /// Periodically drop idle session carts. Must be called within a tokio runtime.
    pub fn spawn_session_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let carts = Arc::clone(&self.carts);
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(every);
            ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                let evicted = carts.evict_idle();
                if evicted > 0 {
                    tracing::info!(evicted, remaining = carts.session_count(), "session sweep");
                }
            }
        })
    }

    pub fn session_count(&self) -> usize {
        self.carts.session_count()
    }

    /// Read the catalog fresh for this request.
    pub async fn catalog(&self) -> Result<CatalogStore, CatalogSourceError> {
        self.catalog.fetch().await
    }

    /// Run an add through the session's cart aggregate; returns the new total.
    pub fn add_to_cart(&self, session_id: SessionId, cmd: AddItem) -> DomainResult<u64> {
        let command = CartCommand::AddItem(cmd);
        self.carts.update(session_id, &mut |cart: &mut CartLedger| {
            for event in cart.handle(&command)? {
                cart.apply(&event);
            }
            Ok(cart.total_count())
        })
    }

    pub fn cart(&self, session_id: SessionId) -> CartLedger {
        self.carts.get(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_infra::FileCatalogSource;

    fn services(idle: Duration) -> AppServices {
        AppServices::new(
            Arc::new(FileCatalogSource::new("unused.json")),
            Arc::new(InMemorySessionCartStore::with_idle_timeout(idle)),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_clears_abandoned_sessions() {
        let services = services(Duration::from_secs(60));
        for _ in 0..100 {
            services
                .add_to_cart(SessionId::new(), AddItem::new(1, 1).unwrap())
                .unwrap();
        }
        assert_eq!(services.session_count(), 100);

        let sweeper = services.spawn_session_sweeper(Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(services.session_count(), 100);

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(services.session_count(), 0);
        sweeper.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn active_session_survives_the_sweep() {
        let services = services(Duration::from_secs(60));
        let session = SessionId::new();
        services.add_to_cart(session, AddItem::new(4, 2).unwrap()).unwrap();
        let sweeper = services.spawn_session_sweeper(Duration::from_secs(10));

        for _ in 0..5 {
            tokio::time::sleep(Duration::from_secs(30)).await;
            services.add_to_cart(session, AddItem::new(4, 1).unwrap()).unwrap();
        }
        assert_eq!(services.cart(session).total_count(), 7);
        assert_eq!(services.session_count(), 1);
        sweeper.abort();
    }
}
