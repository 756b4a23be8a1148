//! HTTP handlers for the order service.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::observability::metrics;
use crate::orders::authorizer::{authorize, AccessError};
use crate::orders::catalog::{Catalog, Order};
use crate::security::access_control::CurrentUser;

/// `GET /`
pub async fn status(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({ "status": "API OK", "user": user }))
}

/// `GET /orders/{order_id}`
///
/// An id that is not an unsigned integer matches no order.
pub async fn get_order(
    State(catalog): State<Arc<Catalog>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, AccessError> {
    let decision = order_id
        .trim()
        .parse::<u64>()
        .map_err(|_| AccessError::NotFound)
        .and_then(|id| authorize(&catalog, &user, id));

    match decision {
        Ok(order) => {
            metrics::record_order_access("allowed");
            Ok(Json(order.clone()))
        }
        Err(e) => {
            if e == AccessError::Forbidden {
                tracing::warn!(user_id = user.id, order_id = %order_id, "Order access denied");
                metrics::record_order_access("forbidden");
            } else {
                metrics::record_order_access("not_found");
            }
            Err(e)
        }
    }
}
