/**
 * Order Lifecycle
 *
 * Business rules for orders and their items. Every operation runs on the
 * caller's session connection and receives the already-authenticated caller.
 *
 * # Rules
 *
 * - Any authenticated user may create an order for any existing user.
 * - Only administrators list every order or change an order's status.
 * - Administrators and the owning user may view an order and change its items.
 * - Items change only while the order is `PENDING`, for every caller.
 * - After every item change the order price is recomputed from its items.
 *
 * Status updates are a membership check against the assignable statuses;
 * there is no transition table, so an administrator may move an order from
 * any status to any assignable one.
 *
 * # Check Order
 *
 * Checks run in a fixed order and the first failing check decides the error:
 * status validity, then existence, then order state, then permission.
 */

use std::collections::HashMap;

use sqlx::SqliteConnection;

use super::db;
use super::models::{order_total, NewOrderItem, Order, OrderWithItems};
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::shared::orders::OrderStatus;

/// An order and the number of items it holds
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order: Order,
    pub item_count: i64,
}

/// Result of adding an item
#[derive(Debug, Clone)]
pub struct ItemAdded {
    pub item_id: i64,
    pub order_price: f64,
}

/// Result of removing an item
#[derive(Debug, Clone)]
pub struct ItemRemoved {
    pub remaining_items: usize,
    pub order_price: f64,
}

/// Whether `caller` may act on a resource owned by `owner_id`
pub fn is_admin_or_owner(caller: &User, owner_id: i64) -> bool {
    caller.admin || caller.id == owner_id
}

/// Create a pending order owned by `owner_id`
pub async fn create_order(conn: &mut SqliteConnection, owner_id: i64) -> Result<Order, BackendError> {
    if get_user_by_id(&mut *conn, owner_id).await?.is_none() {
        return Err(BackendError::NotFound("User"));
    }

    let order = db::insert_order(&mut *conn, owner_id).await?;
    tracing::info!("Order {} created for user {}", order.id, owner_id);
    Ok(order)
}

/// List every order (administrators only)
pub async fn list_all(conn: &mut SqliteConnection, caller: &User) -> Result<Vec<Order>, BackendError> {
    if !caller.admin {
        return Err(BackendError::Forbidden("list orders"));
    }

    Ok(db::list_orders(&mut *conn).await?)
}

/// List the caller's own orders with their items
pub async fn list_mine(
    conn: &mut SqliteConnection,
    caller: &User,
) -> Result<Vec<OrderWithItems>, BackendError> {
    let orders = db::list_orders_for_user(&mut *conn, caller.id).await?;

    let mut items_by_order: HashMap<i64, Vec<_>> = HashMap::new();
    for item in db::list_items_for_user(&mut *conn, caller.id).await? {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| OrderWithItems {
            items: items_by_order.remove(&order.id).unwrap_or_default(),
            order,
        })
        .collect())
}

/// View one order
pub async fn view(
    conn: &mut SqliteConnection,
    order_id: i64,
    caller: &User,
) -> Result<OrderView, BackendError> {
    let order = db::get_order(&mut *conn, order_id)
        .await?
        .ok_or(BackendError::NotFound("Order"))?;

    if !is_admin_or_owner(caller, order.user_id) {
        return Err(BackendError::Forbidden("view this order"));
    }

    let item_count = db::count_items(&mut *conn, order.id).await?;
    Ok(OrderView { order, item_count })
}

/// Set an order's status (administrators only)
pub async fn update_status(
    conn: &mut SqliteConnection,
    order_id: i64,
    new_status: &str,
    caller: &User,
) -> Result<Order, BackendError> {
    let status = new_status
        .parse::<OrderStatus>()
        .ok()
        .filter(OrderStatus::is_assignable)
        .ok_or_else(|| BackendError::InvalidStatus(new_status.to_string()))?;

    let order = db::get_order(&mut *conn, order_id)
        .await?
        .ok_or(BackendError::NotFound("Order"))?;

    if !caller.admin {
        return Err(BackendError::Forbidden("update this order"));
    }

    let updated = db::update_order_status(&mut *conn, order.id, status).await?;
    tracing::info!(
        "Order {} status changed from {} to {} by user {}",
        order.id,
        order.status,
        updated.status,
        caller.id
    );
    Ok(updated)
}

/// Add an item to a pending order
pub async fn add_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    item: &NewOrderItem,
    caller: &User,
) -> Result<ItemAdded, BackendError> {
    let order = db::get_order(&mut *conn, order_id)
        .await?
        .ok_or(BackendError::NotFound("Order"))?;

    if !order.status.allows_item_changes() {
        return Err(BackendError::InvalidState {
            action: "add",
            status: order.status,
        });
    }

    if !is_admin_or_owner(caller, order.user_id) {
        return Err(BackendError::Forbidden("add items to this order"));
    }

    let inserted = db::insert_item(&mut *conn, order.id, item).await?;
    let (order_price, _) = recompute_price(&mut *conn, order.id).await?;

    tracing::info!("Item {} added to order {}, price now {}", inserted.id, order.id, order_price);
    Ok(ItemAdded {
        item_id: inserted.id,
        order_price,
    })
}

/// Remove an item from a pending order
pub async fn remove_item(
    conn: &mut SqliteConnection,
    item_id: i64,
    caller: &User,
) -> Result<ItemRemoved, BackendError> {
    let item = db::get_item(&mut *conn, item_id)
        .await?
        .ok_or(BackendError::NotFound("Item in order"))?;

    let order = db::get_order(&mut *conn, item.order_id)
        .await?
        .ok_or(BackendError::NotFound("Order"))?;

    if !order.status.allows_item_changes() {
        return Err(BackendError::InvalidState {
            action: "remove",
            status: order.status,
        });
    }

    if !is_admin_or_owner(caller, order.user_id) {
        return Err(BackendError::Forbidden("remove items from this order"));
    }

    db::delete_item(&mut *conn, item.id).await?;
    let (order_price, remaining_items) = recompute_price(&mut *conn, order.id).await?;

    tracing::info!("Item {} removed from order {}, price now {}", item.id, order.id, order_price);
    Ok(ItemRemoved {
        remaining_items,
        order_price,
    })
}

/// Recompute and store an order's price from its current items
///
/// Returns the new price and the number of items it was computed from.
async fn recompute_price(conn: &mut SqliteConnection, order_id: i64) -> Result<(f64, usize), sqlx::Error> {
    let items = db::list_items(&mut *conn, order_id).await?;
    let price = order_total(&items);
    db::update_order_price(&mut *conn, order_id, price).await?;
    Ok((price, items.len()))
}
