//! Database operations for orders and order items
//!
//! Every function takes the request's connection so that all reads and writes
//! of one request happen inside its session transaction.

use sqlx::SqliteConnection;

use super::models::{NewOrderItem, Order, OrderItem};
use crate::shared::orders::OrderStatus;

const ORDER_COLUMNS: &str = "id, status, user_id, price";
const ITEM_COLUMNS: &str = "id, quantity, flavor, size, unit_price, order_id";

/// Insert a new pending order with price 0
pub async fn insert_order(conn: &mut SqliteConnection, user_id: i64) -> Result<Order, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO orders (status, user_id, price) VALUES ($1, $2, 0) RETURNING {ORDER_COLUMNS}"
    ))
    .bind(OrderStatus::Pending.as_str())
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await
}

/// Get an order by ID
pub async fn get_order(conn: &mut SqliteConnection, order_id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await
}

/// List every order
pub async fn list_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"))
        .fetch_all(&mut *conn)
        .await
}

/// List the orders owned by a user
pub async fn list_orders_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY id"
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}

/// Set the status of an order
pub async fn update_order_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    status: OrderStatus,
) -> Result<Order, sqlx::Error> {
    sqlx::query_as::<_, Order>(&format!(
        "UPDATE orders SET status = $1 WHERE id = $2 RETURNING {ORDER_COLUMNS}"
    ))
    .bind(status.as_str())
    .bind(order_id)
    .fetch_one(&mut *conn)
    .await
}

/// Store a recomputed price
pub async fn update_order_price(
    conn: &mut SqliteConnection,
    order_id: i64,
    price: f64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET price = $1 WHERE id = $2")
        .bind(price)
        .bind(order_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Insert an item into an order
pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    item: &NewOrderItem,
) -> Result<OrderItem, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(&format!(
        r#"
        INSERT INTO order_items (quantity, flavor, size, unit_price, order_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {ITEM_COLUMNS}
        "#
    ))
    .bind(item.quantity)
    .bind(&item.flavor)
    .bind(&item.size)
    .bind(item.unit_price)
    .bind(order_id)
    .fetch_one(&mut *conn)
    .await
}

/// Get an order item by ID
pub async fn get_item(conn: &mut SqliteConnection, item_id: i64) -> Result<Option<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(&format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE id = $1"))
        .bind(item_id)
        .fetch_optional(&mut *conn)
        .await
}

/// Delete an order item
pub async fn delete_item(conn: &mut SqliteConnection, item_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM order_items WHERE id = $1")
        .bind(item_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// List the items of an order
pub async fn list_items(conn: &mut SqliteConnection, order_id: i64) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(&format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id"
    ))
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await
}

/// Count the items of an order
pub async fn count_items(conn: &mut SqliteConnection, order_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items WHERE order_id = $1")
        .bind(order_id)
        .fetch_one(&mut *conn)
        .await
}

/// List the items of every order owned by a user
pub async fn list_items_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as::<_, OrderItem>(
        r#"
        SELECT i.id, i.quantity, i.flavor, i.size, i.unit_price, i.order_id
        FROM order_items i
        JOIN orders o ON o.id = i.order_id
        WHERE o.user_id = $1
        ORDER BY i.id
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
}
