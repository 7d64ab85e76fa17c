use axum::{
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};

use storefront_core::SessionId;

use crate::context::SessionContext;

pub const SESSION_COOKIE: &str = "storefront_session";

/// Resolve the browsing session from the cookie, issuing one when missing.
pub async fn session_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = match session_from_cookies(req.headers()) {
        Some(id) => SessionContext::existing(id),
        None => SessionContext::fresh(),
    };
    req.extensions_mut().insert(ctx);

    let mut res = next.run(req).await;

    if ctx.is_new() {
        let cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            ctx.session_id()
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                res.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "failed to encode session cookie"),
        }
    }

    res
}

fn session_from_cookies(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        map
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let id = SessionId::new();
        let found = session_from_cookies(&headers(&format!(
            "theme=dark; {SESSION_COOKIE}={id}; lang=en"
        )));
        assert_eq!(found, Some(id));
    }

    #[test]
    fn missing_or_garbled_cookie_yields_none() {
        assert_eq!(session_from_cookies(&HeaderMap::new()), None);
        assert_eq!(session_from_cookies(&headers("theme=dark")), None);
        assert_eq!(
            session_from_cookies(&headers(&format!("{SESSION_COOKIE}=not-a-uuid"))),
            None
        );
    }
}
