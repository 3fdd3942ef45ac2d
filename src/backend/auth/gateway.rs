/**
 * Auth Gateway
 *
 * Registration and login flows. Registration hashes the password with
 * bcrypt and stores the user; login checks credentials against the stored
 * hash and hands out tokens from the token service.
 *
 * Unknown emails and wrong passwords answer with the same error, and an
 * unknown email still pays one bcrypt computation at the configured cost so
 * both branches take comparable time.
 */

use sqlx::SqliteConnection;

use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::{create_user, get_user_by_email, NewUser, User};
use crate::backend::error::BackendError;

/// Registration input
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub active: bool,
    pub admin: bool,
}

/// Access and refresh token issued at login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Register a new user
pub async fn register(
    conn: &mut SqliteConnection,
    hash_cost: u32,
    registration: Registration,
) -> Result<User, BackendError> {
    if get_user_by_email(&mut *conn, &registration.email).await?.is_some() {
        return Err(BackendError::DuplicateEmail);
    }

    let password_hash = bcrypt::hash(&registration.password, hash_cost)?;

    let new_user = NewUser {
        name: registration.name,
        email: registration.email,
        password_hash,
        active: registration.active,
        admin: registration.admin,
    };

    let user = create_user(&mut *conn, &new_user).await.map_err(|e| match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => BackendError::DuplicateEmail,
        other => BackendError::Database(other),
    })?;

    tracing::info!("User registered: {} ({})", user.name, user.email);
    Ok(user)
}

/// Check an email/password pair and return the matching user
pub async fn authenticate(
    conn: &mut SqliteConnection,
    hash_cost: u32,
    email: &str,
    password: &str,
) -> Result<User, BackendError> {
    let Some(user) = get_user_by_email(&mut *conn, email).await? else {
        // Match the work of verifying against a stored hash
        bcrypt::hash(password, hash_cost)?;
        tracing::warn!("Login for unknown email: {}", email);
        return Err(BackendError::InvalidCredentials);
    };

    if !bcrypt::verify(password, &user.password)? {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::InvalidCredentials);
    }

    Ok(user)
}

/// Log in with email and password, returning an access and a refresh token
pub async fn login(
    conn: &mut SqliteConnection,
    tokens: &TokenService,
    hash_cost: u32,
    email: &str,
    password: &str,
) -> Result<TokenPair, BackendError> {
    let user = authenticate(conn, hash_cost, email, password).await?;

    let pair = TokenPair {
        access_token: tokens.issue_access(user.id)?,
        refresh_token: tokens.issue_refresh(user.id)?,
    };

    tracing::info!("User logged in: {}", user.email);
    Ok(pair)
}

/// Log in with form credentials, returning only an access token
///
/// `username` carries the email address.
pub async fn login_form(
    conn: &mut SqliteConnection,
    tokens: &TokenService,
    hash_cost: u32,
    username: &str,
    password: &str,
) -> Result<String, BackendError> {
    let user = authenticate(conn, hash_cost, username, password).await?;
    let access_token = tokens.issue_access(user.id)?;

    tracing::info!("User logged in via form: {}", user.email);
    Ok(access_token)
}

/// Issue a fresh access token for an already verified user
pub fn refresh(tokens: &TokenService, user: &User) -> Result<String, BackendError> {
    Ok(tokens.issue_access(user.id)?)
}
