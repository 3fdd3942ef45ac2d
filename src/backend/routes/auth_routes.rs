/**
 * Auth Routes
 *
 * - `GET /auth/` - Greeting (public)
 * - `POST /auth/register` - User registration (public)
 * - `POST /auth/login` - JSON login (public)
 * - `POST /auth/login-form` - Form login (public)
 * - `GET /auth/refresh` - New access token (requires bearer token)
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{home, login, login_form, refresh, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure the `/auth` routes
pub fn configure_auth_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected: Router<AppState> = Router::new()
        .route("/auth/refresh", get(refresh))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    router
        .route("/auth/", get(home))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/login-form", post(login_form))
        .merge(protected)
}
