use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Extension, rejection::FormRejection},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    routing::post,
};

use storefront_cart::AddItem;

use crate::app::dto::{AddToCartForm, AddToCartResponse, CartResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub const ADDED_MESSAGE: &str = "Product added to cart";

pub fn router() -> Router {
    Router::new().route("/cart", post(add_to_cart).get(get_cart))
}

/// `POST /cart` with form fields `id`, `qty` and optionally `redirect`.
///
/// XHR callers get JSON; plain form posts are redirected back.
pub async fn add_to_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    headers: HeaderMap,
    form: Result<Form<AddToCartForm>, FormRejection>,
) -> Response {
    let ajax = is_ajax(&headers);
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            tracing::debug!(error = %e, "unreadable cart form");
            AddToCartForm::default()
        }
    };

    let result = AddItem::from_form(form.id.as_deref(), form.qty.as_deref())
        .and_then(|cmd| Ok((cmd, services.add_to_cart(session.session_id(), cmd)?)));

    match result {
        Ok((cmd, count)) => {
            tracing::info!(
                session = %session.session_id(),
                product_id = %cmd.product_id,
                quantity = cmd.quantity,
                count,
                "added to cart"
            );
            if ajax {
                Json(AddToCartResponse {
                    success: true,
                    count,
                    id: cmd.product_id.get(),
                    message: ADDED_MESSAGE,
                })
                .into_response()
            } else {
                Redirect::to(&safe_redirect(form.redirect.as_deref())).into_response()
            }
        }
        Err(e) => {
            tracing::warn!(session = %session.session_id(), error = %e, "add to cart rejected");
            if ajax {
                errors::cart_error(&e)
            } else {
                errors::cart_error_for_form(&e)
            }
        }
    }
}

/// `GET /cart`: the session's lines, ascending by product id.
pub async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    let cart = services.cart(session.session_id());
    Json(CartResponse {
        success: true,
        count: cart.total_count(),
        items: cart.lines(),
    })
    .into_response()
}

fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

// Only same-site paths; anything else goes to the storefront root.
fn safe_redirect(target: Option<&str>) -> String {
    match target.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
