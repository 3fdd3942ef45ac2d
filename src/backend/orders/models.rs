//! Order and order item rows, plus the request bodies that create them.

use serde::{Deserialize, Serialize};

use crate::shared::orders::OrderStatus;

/// A row of the `orders` table
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    /// Owning user
    #[serde(rename = "user")]
    pub user_id: i64,
    /// Sum of `unit_price * quantity` over the order's items
    pub price: f64,
}

/// A row of the `order_items` table
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub quantity: i64,
    pub flavor: String,
    pub size: String,
    pub unit_price: f64,
    /// Parent order
    #[serde(rename = "order")]
    pub order_id: i64,
}

/// Item fields supplied by the caller when adding to an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderItem {
    pub quantity: i64,
    pub flavor: String,
    pub size: String,
    pub unit_price: f64,
}

/// An order together with its items
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Total price of a set of items
pub fn order_total(items: &[OrderItem]) -> f64 {
    items
        .iter()
        .map(|item| item.unit_price * item.quantity as f64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, unit_price: f64) -> OrderItem {
        OrderItem {
            id: 0,
            quantity,
            flavor: "margherita".to_string(),
            size: "large".to_string(),
            unit_price,
            order_id: 1,
        }
    }

    #[test]
    fn test_order_total() {
        assert_eq!(order_total(&[]), 0.0);
        assert_eq!(order_total(&[item(2, 5.0)]), 10.0);
        assert_eq!(order_total(&[item(2, 5.0), item(1, 3.0)]), 13.0);
    }

    #[test]
    fn test_order_serializes_owner_as_user() {
        let order = Order {
            id: 3,
            status: OrderStatus::Pending,
            user_id: 9,
            price: 0.0,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["user"], 9);
        assert_eq!(json["status"], "PENDING");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_order_with_items_is_flattened() {
        let json = serde_json::to_value(OrderWithItems {
            order: Order {
                id: 1,
                status: OrderStatus::InProgress,
                user_id: 2,
                price: 10.0,
            },
            items: vec![item(2, 5.0)],
        })
        .unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["items"][0]["order"], 1);
        assert_eq!(json["items"][0]["unit_price"], 5.0);
    }
}
