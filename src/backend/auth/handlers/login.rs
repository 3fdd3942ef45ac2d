/**
 * Login Handlers
 *
 * POST /auth/login takes JSON credentials and returns an access and a
 * refresh token. POST /auth/login-form takes form-encoded credentials and
 * returns an access token only.
 *
 * Unknown emails and wrong passwords both answer 400 with the same message.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::gateway;
use crate::backend::auth::handlers::types::{
    AccessTokenResponse, LoginForm, LoginRequest, LoginResponse, TOKEN_TYPE,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::extract::{ApiForm, ApiJson};
use crate::backend::middleware::session::DbSession;
use crate::backend::server::state::AppState;

/// JSON login handler
pub async fn login(
    State(state): State<AppState>,
    mut session: DbSession,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, BackendError> {
    let pair = gateway::login(
        &mut session,
        &state.tokens,
        state.password_hash_cost,
        &request.email,
        &request.password,
    )
    .await?;
    session.commit().await?;

    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: TOKEN_TYPE.to_string(),
    }))
}

/// Form login handler
pub async fn login_form(
    State(state): State<AppState>,
    mut session: DbSession,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<AccessTokenResponse>, BackendError> {
    let access_token = gateway::login_form(
        &mut session,
        &state.tokens,
        state.password_hash_cost,
        &form.username,
        &form.password,
    )
    .await?;
    session.commit().await?;

    Ok(Json(AccessTokenResponse {
        access_token,
        token_type: TOKEN_TYPE.to_string(),
    }))
}
