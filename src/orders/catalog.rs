//! Static users and orders for the IDOR demo.

use serde::Serialize;

/// A caller of the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub department: String,
}

/// An order owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: u64,
    #[serde(rename = "userId")]
    pub owner_id: u64,
    pub item: String,
    pub region: String,
    pub total: u64,
}

/// Read-only lookup tables, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    users: Vec<User>,
    orders: Vec<Order>,
}

impl Catalog {
    pub fn new(users: Vec<User>, orders: Vec<Order>) -> Self {
        Self { users, orders }
    }

    /// Alice, Bob and Charlie with four orders split between Alice and Bob.
    pub fn demo() -> Self {
        let user = |id, name: &str, role: &str, department: &str| User {
            id,
            name: name.into(),
            role: role.into(),
            department: department.into(),
        };
        let order = |id, owner_id, item: &str, region: &str, total| Order {
            id,
            owner_id,
            item: item.into(),
            region: region.into(),
            total,
        };

        Self::new(
            vec![
                user(1, "Alice", "customer", "north"),
                user(2, "Bob", "customer", "south"),
                user(3, "Charlie", "support", "north"),
            ],
            vec![
                order(1, 1, "Laptop", "north", 2000),
                order(2, 1, "Mouse", "north", 40),
                order(3, 2, "Monitor", "south", 300),
                order(4, 2, "Keyboard", "south", 60),
            ],
        )
    }

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn order(&self, id: u64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_serializes_owner_as_user_id() {
        let catalog = Catalog::demo();
        let value = serde_json::to_value(catalog.order(3).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "id": 3, "userId": 2, "item": "Monitor", "region": "south", "total": 300 })
        );
    }
}
