//! Property-based tests for order pricing
//!
//! After any sequence of item additions and removals on a pending order, the
//! stored price equals the sum of `unit_price * quantity` over the items that
//! remain.

use proptest::prelude::*;
use sqlx::SqliteConnection;

use orderflow::backend::auth::users::{create_user, NewUser, User};
use orderflow::backend::orders::{db, lifecycle, NewOrderItem};
use orderflow::backend::server::connect_database;

#[derive(Debug, Clone)]
enum ItemOp {
    Add { quantity: i64, unit_price_cents: i64 },
    Remove { index: usize },
}

fn item_op() -> impl Strategy<Value = ItemOp> {
    prop_oneof![
        (1i64..20, 0i64..10_000).prop_map(|(quantity, unit_price_cents)| ItemOp::Add {
            quantity,
            unit_price_cents
        }),
        (0usize..16).prop_map(|index| ItemOp::Remove { index }),
    ]
}

async fn owner(conn: &mut SqliteConnection) -> User {
    create_user(
        conn,
        &NewUser {
            name: "Owner".to_string(),
            email: "owner@example.com".to_string(),
            password_hash: "hash".to_string(),
            active: true,
            admin: false,
        },
    )
    .await
    .unwrap()
}

/// Apply `ops` and return (stored price, expected price) after each step
async fn run_ops(ops: Vec<ItemOp>) -> Vec<(f64, f64)> {
    let pool = connect_database("sqlite::memory:").await.unwrap();
    let mut conn = pool.acquire().await.unwrap();
    let user = owner(&mut conn).await;
    let order = lifecycle::create_order(&mut conn, user.id).await.unwrap();

    // (item id, line total) for items still on the order
    let mut live: Vec<(i64, f64)> = Vec::new();
    let mut observed = Vec::new();

    for op in ops {
        match op {
            ItemOp::Add { quantity, unit_price_cents } => {
                let unit_price = unit_price_cents as f64 / 100.0;
                let item = NewOrderItem {
                    quantity,
                    flavor: "vanilla".to_string(),
                    size: "M".to_string(),
                    unit_price,
                };
                let added = lifecycle::add_item(&mut conn, order.id, &item, &user).await.unwrap();
                live.push((added.item_id, unit_price * quantity as f64));
            }
            ItemOp::Remove { index } => {
                if live.is_empty() {
                    continue;
                }
                let (item_id, _) = live.remove(index % live.len());
                let removed = lifecycle::remove_item(&mut conn, item_id, &user).await.unwrap();
                assert_eq!(removed.remaining_items, live.len());
            }
        }

        let stored = db::get_order(&mut conn, order.id).await.unwrap().unwrap().price;
        let expected: f64 = live.iter().map(|(_, total)| total).sum();
        observed.push((stored, expected));
    }

    observed
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_price_matches_items(ops in prop::collection::vec(item_op(), 1..24)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let observed = runtime.block_on(run_ops(ops));

        for (stored, expected) in observed {
            prop_assert!((stored - expected).abs() < 1e-6, "stored {} expected {}", stored, expected);
        }
    }
}
