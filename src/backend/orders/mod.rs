//! Orders Module
//!
//! Orders, their items and the rules that govern them.
//!
//! - **`models`** - Row types and request bodies
//! - **`db`** - SQL for orders and items
//! - **`lifecycle`** - Permission and state checks, price recomputation
//! - **`handlers`** - HTTP handlers for `/orders`

pub mod models;

pub mod db;

pub mod lifecycle;

pub mod handlers;

pub use models::{NewOrderItem, Order, OrderItem, OrderWithItems};
