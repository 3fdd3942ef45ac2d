/**
 * Register Handler
 *
 * POST /auth/register. Creates a user with a bcrypt-hashed password.
 * A second registration with the same email fails with 400.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::gateway;
use crate::backend::auth::handlers::types::{AuthHomeResponse, MessageResponse, RegisterRequest};
use crate::backend::error::BackendError;
use crate::backend::middleware::extract::ApiJson;
use crate::backend::middleware::session::DbSession;
use crate::backend::server::state::AppState;

/// Register handler
pub async fn register(
    State(state): State<AppState>,
    mut session: DbSession,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<Json<MessageResponse>, BackendError> {
    let user = gateway::register(&mut session, state.password_hash_cost, request.into()).await?;
    session.commit().await?;

    Ok(Json(MessageResponse {
        message: format!("User {} registered successfully", user.name),
    }))
}

/// Greeting for `GET /auth/`
pub async fn home() -> Json<AuthHomeResponse> {
    Json(AuthHomeResponse {
        message: "You accessed the authentication endpoint".to_string(),
        authenticated: false,
    })
}
