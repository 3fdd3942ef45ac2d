/**
 * Request Database Session
 *
 * Every handler that touches the database takes a `DbSession`: a
 * transaction begun when the handler's arguments are extracted. The handler
 * commits it once its work succeeded. On any other exit (an early `?`
 * return, a panic, a client disconnect) the transaction is dropped, sqlx
 * rolls it back, and the connection goes back to the pool.
 *
 * Sessions start with `BEGIN IMMEDIATE`, taking SQLite's write lock up
 * front. A second writer then waits on the busy timeout instead of failing
 * with `SQLITE_BUSY` when it tries to upgrade a read lock mid-transaction.
 */

use std::ops::{Deref, DerefMut};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::{Sqlite, SqliteConnection, Transaction};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Per-request database session
pub struct DbSession {
    tx: Transaction<'static, Sqlite>,
}

impl DbSession {
    /// Open a session on the pool
    pub async fn begin(pool: &sqlx::SqlitePool) -> Result<Self, sqlx::Error> {
        let tx = pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(Self { tx })
    }

    /// Commit everything written in this session
    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }
}

impl Deref for DbSession {
    type Target = SqliteConnection;

    fn deref(&self) -> &SqliteConnection {
        &self.tx
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }
}

impl FromRequestParts<AppState> for DbSession {
    type Rejection = BackendError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(DbSession::begin(&state.db_pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::{create_user, NewUser};
    use crate::backend::orders::models::NewOrderItem;
    use crate::backend::orders::{db, lifecycle};
    use crate::backend::server::config::connect_database;
    use assert_matches::assert_matches;

    async fn count_users(pool: &sqlx::SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn insert_user(session: &mut DbSession) {
        sqlx::query("INSERT INTO users (name, email, password) VALUES ('A', 'a@x.com', 'h')")
            .execute(&mut **session)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_commit_persists_writes() {
        let pool = connect_database("sqlite::memory:").await.unwrap();

        let mut session = DbSession::begin(&pool).await.unwrap();
        insert_user(&mut session).await;
        session.commit().await.unwrap();

        assert_eq!(count_users(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_failed_operation_discards_earlier_writes() {
        let pool = connect_database("sqlite::memory:").await.unwrap();

        let mut session = DbSession::begin(&pool).await.unwrap();
        let owner = create_user(
            &mut session,
            &NewUser {
                name: "Owner".to_string(),
                email: "owner@x.com".to_string(),
                password_hash: "h".to_string(),
                active: true,
                admin: false,
            },
        )
        .await
        .unwrap();
        let order = lifecycle::create_order(&mut session, owner.id).await.unwrap();
        session.commit().await.unwrap();

        {
            let mut session = DbSession::begin(&pool).await.unwrap();
            let item = NewOrderItem {
                quantity: 2,
                flavor: "mint".to_string(),
                size: "S".to_string(),
                unit_price: 4.0,
            };
            lifecycle::add_item(&mut session, order.id, &item, &owner).await.unwrap();
            assert_matches!(
                lifecycle::remove_item(&mut session, 999, &owner).await,
                Err(BackendError::NotFound(_))
            );
        }

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(db::count_items(&mut conn, order.id).await.unwrap(), 0);
        assert_eq!(db::get_order(&mut conn, order.id).await.unwrap().unwrap().price, 0.0);
    }

    #[tokio::test]
    async fn test_dropped_session_rolls_back() {
        let pool = connect_database("sqlite::memory:").await.unwrap();

        {
            let mut session = DbSession::begin(&pool).await.unwrap();
            insert_user(&mut session).await;
        }

        assert_eq!(count_users(&pool).await, 0);
    }
}
