//! Browsing session: the client-side reconciliation of catalog, filters and cart.
//!
//! - `session.rs`: explicit session context (catalog + cart + widget state)
//! - `view.rs`: derived views handed to the presentation layer
//! - `presenter.rs`: the seam to whatever renders those views
//! - `debounce.rs`: timer-based coalescing of rapid input events
//! - `reconciler.rs`: event handlers wiring the above together

pub mod config;
pub mod debounce;
pub mod presenter;
pub mod reconciler;
pub mod session;
pub mod view;

pub use config::BrowseConfig;
pub use debounce::Debouncer;
pub use presenter::Presenter;
pub use reconciler::{LOAD_ERROR_MESSAGE, Reconciler};
pub use session::{BrowseSession, FilterInputs};
pub use view::{CatalogView, ResultsHeading, ResultsSummary};
