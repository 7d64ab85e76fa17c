use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Local;

use storefront_catalog::{RawFilterParams, filter, sort};

use crate::app::dto::{CategoriesResponse, ProductsResponse};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/categories", get(list_categories))
}

/// `GET /products?search=&category=&price=&rating=&sort=`
///
/// Without `sort` the catalog order is kept; with it the sort engine applies.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<RawFilterParams>, QueryRejection>,
) -> Response {
    let raw = match query {
        Ok(Query(raw)) => raw,
        Err(e) => return errors::catalog_error(StatusCode::BAD_REQUEST, e.body_text()),
    };
    let (params, key) = match raw.normalize() {
        Ok(normalized) => normalized,
        Err(e) => return errors::catalog_error(StatusCode::BAD_REQUEST, e.message()),
    };

    let store = match services.catalog().await {
        Ok(store) => store,
        Err(e) => return errors::source_error_to_response(&e),
    };

    let filtered = filter(store.products(), &params);
    let products = if sort_requested(&raw) {
        sort(&filtered, key)
    } else {
        filtered
    };

    tracing::info!(
        total = store.len(),
        matched = products.len(),
        sort = %key,
        "products listed"
    );

    Json(ProductsResponse {
        success: true,
        count: products.len(),
        products,
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
    .into_response()
}

/// `GET /categories`: distinct categories in catalog order.
pub async fn list_categories(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.catalog().await {
        Ok(store) => Json(CategoriesResponse {
            success: true,
            categories: store.categories(),
        })
        .into_response(),
        Err(e) => errors::source_error_to_response(&e),
    }
}

fn sort_requested(raw: &RawFilterParams) -> bool {
    raw.sort.as_deref().is_some_and(|s| !s.trim().is_empty())
}
