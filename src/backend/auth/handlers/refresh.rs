/**
 * Refresh Handler
 *
 * GET /auth/refresh. The auth middleware has already verified the bearer
 * token (access or refresh) and loaded its user; this handler only issues a
 * new access token for that user.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::gateway;
use crate::backend::auth::handlers::types::{AccessTokenResponse, TOKEN_TYPE};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Refresh handler
pub async fn refresh(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<AccessTokenResponse>, BackendError> {
    let access_token = gateway::refresh(&state.tokens, &user)?;
    tracing::info!("Access token refreshed for user {}", user.id);

    Ok(Json(AccessTokenResponse {
        access_token,
        token_type: TOKEN_TYPE.to_string(),
    }))
}
