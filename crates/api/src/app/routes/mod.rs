use axum::Router;

pub mod cart;
pub mod products;
pub mod system;

/// Router for all session-scoped storefront endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(products::router())
        .merge(cart::router())
}
