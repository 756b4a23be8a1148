//! Order lookup service (IDOR demo).
//!
//! # Data Flow
//! ```text
//! Any request
//!     → security::access_control (X-User-Id → User, else 401)
//!     → GET /                  → {status, user}
//!     → GET /orders/{order_id} → authorizer.rs (404 before 403) → order
//! ```

pub mod authorizer;
pub mod catalog;
pub mod handlers;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;

pub use authorizer::{authenticate, authorize, AccessError};
pub use catalog::{Catalog, Order, User};

use self::handlers::*;
use crate::http::response::not_found;
use crate::security::access_control::require_user;

/// Routes for the order service. Authentication also guards both fallbacks.
pub fn setup_orders_router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/orders/{order_id}", get(get_order))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(catalog.clone(), require_user))
        .with_state(catalog)
}
