//! Concurrent session tests
//!
//! Overlapping writers on a file-backed database queue on SQLite's write
//! lock and all succeed.

use orderflow::backend::auth::users::{create_user, NewUser, User};
use orderflow::backend::error::BackendError;
use orderflow::backend::middleware::DbSession;
use orderflow::backend::orders::models::order_total;
use orderflow::backend::orders::{db, lifecycle, NewOrderItem};
use orderflow::backend::server::connect_database;

const OWNERS: usize = 8;
const WRITES: usize = 40;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_item_additions_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("orders.db").display());
    let pool = connect_database(&url).await.unwrap();

    let mut owners: Vec<(User, i64)> = Vec::new();
    {
        let mut conn = pool.acquire().await.unwrap();
        for i in 0..OWNERS {
            let owner = create_user(
                &mut conn,
                &NewUser {
                    name: format!("Owner {}", i),
                    email: format!("owner{}@example.com", i),
                    password_hash: "hash".to_string(),
                    active: true,
                    admin: false,
                },
            )
            .await
            .unwrap();
            let order = lifecycle::create_order(&mut conn, owner.id).await.unwrap();
            owners.push((owner, order.id));
        }
    }

    let mut tasks = Vec::new();
    for n in 0..WRITES {
        let pool = pool.clone();
        let (owner, order_id) = owners[n % OWNERS].clone();

        tasks.push(tokio::spawn(async move {
            let item = NewOrderItem {
                quantity: (n % 3 + 1) as i64,
                flavor: "vanilla".to_string(),
                size: "M".to_string(),
                unit_price: 1.5,
            };

            let mut session = DbSession::begin(&pool).await?;
            lifecycle::add_item(&mut session, order_id, &item, &owner).await?;
            session.commit().await?;
            Ok::<_, BackendError>(())
        }));
    }

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let mut conn = pool.acquire().await.unwrap();
    for (_, order_id) in &owners {
        let items = db::list_items(&mut conn, *order_id).await.unwrap();
        assert_eq!(items.len(), WRITES / OWNERS);

        let order = db::get_order(&mut conn, *order_id).await.unwrap().unwrap();
        assert!((order.price - order_total(&items)).abs() < 1e-9);
    }
}
