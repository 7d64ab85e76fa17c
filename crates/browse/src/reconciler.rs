//! Event handlers: widget events in, rendered views out.
//!
//! Each handler updates the session and runs the pipeline to completion.
//! Search keystrokes go through the debouncer; selects, the slider, Escape
//! and reset run immediately (and supersede any pending debounced run).

use std::sync::{Arc, Mutex};

use storefront_cart::Cart;
use storefront_core::ProductId;
use storefront_infra::CatalogSource;

use crate::debounce::Debouncer;
use crate::presenter::Presenter;
use crate::session::BrowseSession;

/// Shown in place of the grid when the catalog cannot be fetched.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load products. Please refresh the page.";

const SESSION_UNAVAILABLE: &str = "Session state is unavailable. Please refresh the page.";

pub struct Reconciler<C, P> {
    session: Arc<Mutex<BrowseSession<C>>>,
    presenter: Arc<P>,
    debouncer: Debouncer,
}

impl<C, P> Reconciler<C, P>
where
    C: Cart + 'static,
    P: Presenter,
{
    pub fn new(session: BrowseSession<C>, presenter: Arc<P>) -> Self {
        let debouncer = Debouncer::new(session.config().search_debounce);
        Self {
            session: Arc::new(Mutex::new(session)),
            presenter,
            debouncer,
        }
    }

    /// Shared handle to the session (inspection, teardown).
    pub fn session(&self) -> Arc<Mutex<BrowseSession<C>>> {
        Arc::clone(&self.session)
    }

    /// Fetch the catalog and render it.
    ///
    /// On failure the previous catalog stays in place and an inline error is
    /// shown; nothing is retried.
    pub async fn load_catalog(&self, source: &dyn CatalogSource) {
        match source.fetch().await {
            Ok(store) => {
                tracing::info!(source = %source.describe(), count = store.len(), "loaded products");
                if self.with_session(|s| s.replace_catalog(store)).is_some() {
                    self.run_now();
                }
            }
            Err(e) => {
                tracing::error!(source = %source.describe(), error = %e, "catalog load failed");
                self.presenter.show_error(LOAD_ERROR_MESSAGE);
            }
        }
    }

    pub fn on_search_input(&self, text: &str) {
        if self.with_session(|s| s.set_search(text)).is_some() {
            let session = Arc::clone(&self.session);
            let presenter = Arc::clone(&self.presenter);
            self.debouncer
                .schedule(move || run_pipeline(&*session, presenter.as_ref()));
        }
    }

    /// Escape in the search box clears it and filters right away.
    pub fn on_search_escape(&self) {
        self.apply_now(|s| s.clear_search());
    }

    pub fn on_category_change(&self, category: &str) {
        self.apply_now(|s| s.set_category(category));
    }

    pub fn on_price_change(&self, price: &str) {
        self.apply_now(|s| s.set_max_price(price));
    }

    pub fn on_rating_change(&self, rating: &str) {
        self.apply_now(|s| s.set_min_rating(rating));
    }

    pub fn on_sort_change(&self, key: &str) {
        self.apply_now(|s| s.set_sort(key));
    }

    pub fn on_reset(&self) {
        self.apply_now(|s| s.reset_filters());
    }

    /// Add one unit of the product behind a card button.
    ///
    /// Returns the new total, or `None` after reporting the failure; a failed
    /// add leaves the cart unchanged.
    pub fn on_add_to_cart(&self, raw_id: &str) -> Option<u64> {
        let id = match raw_id.parse::<ProductId>() {
            Ok(id) => id,
            Err(e) => {
                self.presenter.cart_failed(None, e.message());
                return None;
            }
        };

        match self.with_session(|s| s.add_to_cart(id.get() as i64, 1))? {
            Ok(total) => {
                self.presenter.cart_updated(id, total);
                Some(total)
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "add to cart failed");
                self.presenter.cart_failed(Some(id), e.message());
                None
            }
        }
    }

    fn apply_now(&self, f: impl FnOnce(&mut BrowseSession<C>)) {
        if self.with_session(f).is_some() {
            self.run_now();
        }
    }

    fn run_now(&self) {
        self.debouncer.cancel();
        run_pipeline(&*self.session, self.presenter.as_ref());
    }

    fn with_session<R>(&self, f: impl FnOnce(&mut BrowseSession<C>) -> R) -> Option<R> {
        match self.session.lock() {
            Ok(mut session) => Some(f(&mut *session)),
            Err(_) => {
                tracing::error!("browse session lock poisoned");
                self.presenter.show_error(SESSION_UNAVAILABLE);
                None
            }
        }
    }
}

fn run_pipeline<C: Cart, P: Presenter>(session: &Mutex<BrowseSession<C>>, presenter: &P) {
    // Render outside the lock.
    let result = match session.lock() {
        Ok(session) => session.refresh(),
        Err(_) => {
            tracing::error!("browse session lock poisoned");
            presenter.show_error(SESSION_UNAVAILABLE);
            return;
        }
    };

    match result {
        Ok(view) => presenter.render(&view),
        Err(e) => {
            tracing::debug!(error = %e, "filter inputs rejected");
            presenter.show_error(e.message());
        }
    }
}
