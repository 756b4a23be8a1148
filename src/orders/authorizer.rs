//! Caller identification and per-order ownership checks.
//!
//! # Design Decisions
//! - Identity comes straight from the `X-User-Id` header. Anyone can claim
//!   any id; this is the weak trust model the demo is built around
//! - Existence is checked before ownership, so a missing order is a 404 for
//!   everyone and a foreign order is a 403

use thiserror::Error;

use crate::orders::catalog::{Catalog, Order, User};

/// Header carrying the caller's claimed user id.
pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Missing, non-numeric or unknown user id.
    #[error("authentication required")]
    Unauthenticated,

    /// The order exists but belongs to someone else.
    #[error("access forbidden")]
    Forbidden,

    /// No order with that id.
    #[error("order does not exist")]
    NotFound,
}

/// Map a claimed user id to a known user.
pub fn authenticate<'a>(catalog: &'a Catalog, claimed_id: Option<&str>) -> Result<&'a User, AccessError> {
    claimed_id
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .and_then(|id| catalog.user(id))
        .ok_or(AccessError::Unauthenticated)
}

/// Decide whether `principal` may read order `order_id`.
pub fn authorize<'a>(catalog: &'a Catalog, principal: &User, order_id: u64) -> Result<&'a Order, AccessError> {
    let order = catalog.order(order_id).ok_or(AccessError::NotFound)?;

    if order.owner_id != principal.id {
        return Err(AccessError::Forbidden);
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate() {
        let catalog = Catalog::demo();
        assert_eq!(authenticate(&catalog, Some("1")).unwrap().name, "Alice");
        assert_eq!(authenticate(&catalog, Some(" 3 ")).unwrap().name, "Charlie");
        // A leading plus sign is part of the integer grammar.
        assert_eq!(authenticate(&catalog, Some("+2")).unwrap().name, "Bob");

        for claim in [None, Some(""), Some("abc"), Some("99"), Some("-1"), Some("1.5")] {
            assert_eq!(authenticate(&catalog, claim), Err(AccessError::Unauthenticated), "{claim:?}");
        }
    }

    #[test]
    fn test_owner_is_allowed() {
        let catalog = Catalog::demo();
        let bob = catalog.user(2).unwrap();
        let order = authorize(&catalog, bob, 3).unwrap();
        assert_eq!(order.item, "Monitor");
    }

    #[test]
    fn test_foreign_order_is_forbidden() {
        let catalog = Catalog::demo();
        let alice = catalog.user(1).unwrap();
        assert_eq!(authorize(&catalog, alice, 3), Err(AccessError::Forbidden));

        // Support staff get no special treatment.
        let charlie = catalog.user(3).unwrap();
        for id in 1..=4 {
            assert_eq!(authorize(&catalog, charlie, id), Err(AccessError::Forbidden));
        }
    }

    #[test]
    fn test_missing_order_is_not_found_for_everyone() {
        let catalog = Catalog::demo();
        for user_id in 1..=3 {
            let user = catalog.user(user_id).unwrap();
            assert_eq!(authorize(&catalog, user, 99), Err(AccessError::NotFound));
        }
    }
}
