//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: catalog source and session cart store handles
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response bodies and the cart form
//! - `errors.rs`: consistent failure responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: AppServices) -> Router {
    let storefront = routes::router().layer(
        ServiceBuilder::new()
            .layer(Extension(Arc::new(services)))
            .layer(axum::middleware::from_fn(middleware::session_middleware)),
    );

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(storefront)
}
