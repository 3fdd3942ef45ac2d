/**
 * Authentication Middleware
 *
 * Protects routes that require a bearer token. The middleware verifies the
 * token with the token service, loads the user it names and attaches that
 * user to the request extensions, where the `AuthUser` extractor picks it
 * up in handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub User);

/// Extract the bearer token from the `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(BackendError::Unauthenticated)?;

    let (scheme, token) = auth_header
        .split_once(' ')
        .ok_or(BackendError::Unauthenticated)?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(BackendError::Unauthenticated);
    }

    Ok(token.trim())
}

/// Authentication middleware
///
/// Rejects with 401 when the token is missing or invalid and with 404 when
/// the token names a user that no longer exists.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user_id = app_state.tokens.verify(bearer_token(request.headers())?)?;

    let mut conn = app_state.db_pool.acquire().await?;
    let user = get_user_by_id(&mut conn, user_id).await?;
    // Released before the handler opens its own session
    drop(conn);

    let user = user.ok_or_else(|| {
        tracing::warn!("Token names unknown user {}", user_id);
        BackendError::UnknownUser
    })?;

    tracing::debug!("Authenticated user {} ({})", user.id, user.email);
    request.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only usable on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}
