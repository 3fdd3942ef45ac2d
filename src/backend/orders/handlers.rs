/**
 * Order Handlers
 *
 * HTTP handlers for the `/orders` endpoints. Every route sits behind the
 * auth middleware, so handlers receive the caller through `AuthUser`.
 * Handlers that touch the database take a `DbSession` and commit it once
 * the lifecycle operation succeeded.
 *
 * # Routes
 *
 * - `GET /orders/` - Greeting
 * - `POST /orders/order` - Create an order for a user
 * - `GET /orders/list` - Every order (administrators)
 * - `GET /orders/list/user_order` - Caller's orders with items
 * - `GET /orders/order/{id}` - One order and its item count
 * - `PATCH /orders/order/{id}/status?status=X` - Set status (administrators)
 * - `POST /orders/order/add-item/{id}` - Add an item to a pending order
 * - `DELETE /orders/order/remove-item/{item_id}` - Remove an item
 */

use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::lifecycle;
use super::models::{NewOrderItem, Order, OrderWithItems};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::middleware::extract::{ApiJson, ApiPath, ApiQuery};
use crate::backend::middleware::session::DbSession;

/// Body of `POST /orders/order`
#[derive(Deserialize, Serialize, Debug)]
pub struct CreateOrderRequest {
    /// Id of the user who will own the order
    pub user: i64,
}

/// Query of `PATCH /orders/order/{id}/status`
#[derive(Deserialize, Debug)]
pub struct StatusQuery {
    pub status: String,
}

#[derive(Serialize, Debug)]
pub struct GreetingResponse {
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct OrderCreatedResponse {
    pub message: String,
    pub order_id: i64,
}

#[derive(Serialize, Debug)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

#[derive(Serialize, Debug)]
pub struct OwnOrdersResponse {
    pub orders: Vec<OrderWithItems>,
}

#[derive(Serialize, Debug)]
pub struct OrderViewResponse {
    pub order: Order,
    pub item_count: i64,
}

#[derive(Serialize, Debug)]
pub struct StatusUpdatedResponse {
    pub message: String,
    pub order: Order,
}

#[derive(Serialize, Debug)]
pub struct ItemAddedResponse {
    pub message: String,
    pub item_id: i64,
    pub price_order: f64,
}

#[derive(Serialize, Debug)]
pub struct ItemRemovedResponse {
    pub message: String,
    pub quantity_order_items: usize,
    pub price_order: f64,
}

/// Greeting for `GET /orders/`
pub async fn home(AuthUser(_user): AuthUser) -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "You accessed the orders endpoint".to_string(),
    })
}

/// Create a pending order
pub async fn create_order(
    AuthUser(_caller): AuthUser,
    mut session: DbSession,
    ApiJson(request): ApiJson<CreateOrderRequest>,
) -> Result<Json<OrderCreatedResponse>, BackendError> {
    let order = lifecycle::create_order(&mut session, request.user).await?;
    session.commit().await?;

    Ok(Json(OrderCreatedResponse {
        message: format!("Order created successfully order_id: {}", order.id),
        order_id: order.id,
    }))
}

/// List every order
pub async fn list_orders(
    AuthUser(caller): AuthUser,
    mut session: DbSession,
) -> Result<Json<OrderListResponse>, BackendError> {
    let orders = lifecycle::list_all(&mut session, &caller).await?;
    session.commit().await?;

    Ok(Json(OrderListResponse { orders }))
}

/// List the caller's orders
pub async fn list_user_orders(
    AuthUser(caller): AuthUser,
    mut session: DbSession,
) -> Result<Json<OwnOrdersResponse>, BackendError> {
    let orders = lifecycle::list_mine(&mut session, &caller).await?;
    session.commit().await?;

    Ok(Json(OwnOrdersResponse { orders }))
}

/// View one order
pub async fn view_order(
    AuthUser(caller): AuthUser,
    ApiPath(order_id): ApiPath<i64>,
    mut session: DbSession,
) -> Result<Json<OrderViewResponse>, BackendError> {
    let view = lifecycle::view(&mut session, order_id, &caller).await?;
    session.commit().await?;

    Ok(Json(OrderViewResponse {
        order: view.order,
        item_count: view.item_count,
    }))
}

/// Set an order's status
pub async fn update_order_status(
    AuthUser(caller): AuthUser,
    ApiPath(order_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<StatusQuery>,
    mut session: DbSession,
) -> Result<Json<StatusUpdatedResponse>, BackendError> {
    let order = lifecycle::update_status(&mut session, order_id, &query.status, &caller).await?;
    session.commit().await?;

    Ok(Json(StatusUpdatedResponse {
        message: format!("Order number {} status updated to {} successfully", order.id, order.status),
        order,
    }))
}

/// Add an item to an order
pub async fn add_order_item(
    AuthUser(caller): AuthUser,
    ApiPath(order_id): ApiPath<i64>,
    mut session: DbSession,
    ApiJson(item): ApiJson<NewOrderItem>,
) -> Result<Json<ItemAddedResponse>, BackendError> {
    let added = lifecycle::add_item(&mut session, order_id, &item, &caller).await?;
    session.commit().await?;

    Ok(Json(ItemAddedResponse {
        message: "Item created successfully".to_string(),
        item_id: added.item_id,
        price_order: added.order_price,
    }))
}

/// Remove an item from its order
pub async fn remove_order_item(
    AuthUser(caller): AuthUser,
    ApiPath(item_id): ApiPath<i64>,
    mut session: DbSession,
) -> Result<Json<ItemRemovedResponse>, BackendError> {
    let removed = lifecycle::remove_item(&mut session, item_id, &caller).await?;
    session.commit().await?;

    Ok(Json(ItemRemovedResponse {
        message: "Item removed successfully".to_string(),
        quantity_order_items: removed.remaining_items,
        price_order: removed.order_price,
    }))
}
