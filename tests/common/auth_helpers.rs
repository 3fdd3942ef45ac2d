//! Authentication test helpers
//!
//! Register users and log them in through the HTTP API.

use serde_json::{json, Value};

use orderflow::backend::auth::users::get_user_by_email;

use super::database::TestApp;

/// A registered, logged-in user
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub const TEST_PASSWORD: &str = "password123";

/// Register a user through the API and log them in
pub async fn create_test_user(app: &TestApp, name: &str, email: &str, admin: bool) -> TestUser {
    app.server
        .post("/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
            "admin": admin,
        }))
        .await
        .assert_status_ok();

    let login: Value = app
        .server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await
        .json();

    // The in-memory pool holds one connection; release it before the next request
    let mut conn = app.pool.acquire().await.expect("connection");
    let user = get_user_by_email(&mut conn, email)
        .await
        .expect("user lookup")
        .expect("registered user");
    drop(conn);

    TestUser {
        id: user.id,
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        access_token: login["access_token"].as_str().expect("access token").to_string(),
        refresh_token: login["refresh_token"].as_str().expect("refresh token").to_string(),
    }
}

/// Create an order owned by `owner` and return its id
pub async fn create_test_order(app: &TestApp, owner: &TestUser) -> i64 {
    let body: Value = app
        .server
        .post("/orders/order")
        .authorization_bearer(&owner.access_token)
        .json(&json!({ "user": owner.id }))
        .await
        .json();

    body["order_id"].as_i64().expect("order id")
}

/// Add an item to an order and return the response body
pub async fn add_test_item(app: &TestApp, user: &TestUser, order_id: i64, quantity: i64, unit_price: f64) -> Value {
    app.server
        .post(&format!("/orders/order/add-item/{}", order_id))
        .authorization_bearer(&user.access_token)
        .json(&json!({
            "quantity": quantity,
            "flavor": "vanilla",
            "size": "M",
            "unit_price": unit_price,
        }))
        .await
        .json()
}
