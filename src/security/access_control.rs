//! Header-based caller identification for the order service.
//! Trusts `X-User-Id` as-is; there is no credential behind it.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::orders::authorizer::{authenticate, USER_ID_HEADER};
use crate::orders::catalog::{Catalog, User};

/// Context attached to authenticated requests.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

pub async fn require_user(
    State(catalog): State<Arc<Catalog>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let claimed = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok());

    match authenticate(&catalog, claimed) {
        Ok(user) => {
            let ctx = CurrentUser(user.clone());
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(path = %req.uri().path(), "Request without a known user id");
            e.into_response()
        }
    }
}
