/**
 * User Model and Database Operations
 *
 * Persisted user records: identity, bcrypt password hash and the
 * active/admin flags. Users are written once at registration and only read
 * afterwards.
 */

use serde::Serialize;
use sqlx::SqliteConnection;

/// User struct representing a row of the `users` table
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Auto-assigned user ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Unique email address, used as the login name
    pub email: String,
    /// Hashed password (bcrypt), never serialized
    #[serde(skip_serializing)]
    pub password: String,
    /// Whether the account is active
    pub active: bool,
    /// Administrators bypass ownership checks
    pub admin: bool,
}

/// Fields needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    /// Already hashed password
    pub password_hash: String,
    pub active: bool,
    pub admin: bool,
}

/// Create a new user
///
/// # Errors
/// Fails with a unique violation if the email is already registered.
pub async fn create_user(conn: &mut SqliteConnection, new_user: &NewUser) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password, active, admin)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, email, password, active, admin
        "#
    )
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(new_user.active)
    .bind(new_user.admin)
    .fetch_one(&mut *conn)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, active, admin
        FROM users
        WHERE email = $1
        "#
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, active, admin
        FROM users
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(user)
}
