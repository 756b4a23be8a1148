//! Request ID handling.
//!
//! # Responsibilities
//! - Generate a UUID v4 `x-request-id` when the client sent none
//! - Copy the ID onto the response
//!
//! # Design Decisions
//! - Request ID added as early as possible so trace spans carry it
//! - Client-supplied IDs are kept as-is (they are only used for correlation)

use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Wrap `router` with request ID assignment, tracing and propagation.
///
/// Layer order (outermost first): set ID → trace → propagate ID → router.
pub fn with_request_tracing(router: Router) -> Router {
    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
