use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use storefront_core::DomainError;
use storefront_infra::CatalogSourceError;

/// Failure shape of the catalog endpoints: `{ success, error, count, products }`.
pub fn catalog_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": message.into(),
            "count": 0,
            "products": [],
        })),
    )
        .into_response()
}

/// Every source failure is a server-side problem for the caller.
pub fn source_error_to_response(err: &CatalogSourceError) -> Response {
    let message = match err {
        CatalogSourceError::NotFound(msg)
        | CatalogSourceError::Transport(msg)
        | CatalogSourceError::Format(msg) => msg.clone(),
    };
    tracing::error!(error = %err, "catalog source failed");
    catalog_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Failure shape of the cart endpoint: `{ success, error }`.
pub fn cart_error(err: &DomainError) -> Response {
    let status = match err {
        DomainError::InvalidInput(_) | DomainError::NotFound(_) => StatusCode::BAD_REQUEST,
        DomainError::InvariantViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    json_error(status, err.message())
}

/// Plain-form cart failure: the caller is sent back to the storefront.
pub fn cart_error_for_form(err: &DomainError) -> Response {
    let mut res = cart_error(err);
    res.headers_mut()
        .insert(header::LOCATION, header::HeaderValue::from_static("/"));
    res
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": message.into(),
        })),
    )
        .into_response()
}
