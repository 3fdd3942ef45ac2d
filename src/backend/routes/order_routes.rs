/**
 * Order Routes
 *
 * Every `/orders` route requires a bearer token; the auth middleware is
 * applied to the whole group.
 */

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::backend::middleware::auth_middleware;
use crate::backend::orders::handlers::{
    add_order_item, create_order, home, list_orders, list_user_orders, remove_order_item,
    update_order_status, view_order,
};
use crate::backend::server::state::AppState;

/// Configure the `/orders` routes
pub fn configure_order_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let orders: Router<AppState> = Router::new()
        .route("/orders/", get(home))
        .route("/orders/order", post(create_order))
        .route("/orders/list", get(list_orders))
        .route("/orders/list/user_order", get(list_user_orders))
        .route("/orders/order/{order_id}", get(view_order))
        .route("/orders/order/{order_id}/status", patch(update_order_status))
        .route("/orders/order/add-item/{order_id}", post(add_order_item))
        .route("/orders/order/remove-item/{item_id}", delete(remove_order_item))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    router.merge(orders)
}
