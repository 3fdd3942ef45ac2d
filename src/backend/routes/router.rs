/**
 * Router Configuration
 *
 * Combines the route groups into a single Axum router, adds request
 * tracing and a JSON 404 fallback.
 */

use axum::{http::StatusCode, response::Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::backend::routes::auth_routes::configure_auth_routes;
use crate::backend::routes::order_routes::configure_order_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// ## Auth Routes
///
/// - `GET /auth/`, `POST /auth/register`, `POST /auth/login`,
///   `POST /auth/login-form` (public)
/// - `GET /auth/refresh` (bearer token)
///
/// ## Order Routes
///
/// All under `/orders`, all requiring a bearer token.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_auth_routes(router, &app_state);
    let router = configure_order_routes(router, &app_state);

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found", "status": StatusCode::NOT_FOUND.as_u16() })),
    )
}
