//! Routes Module
//!
//! - **`router`** - `create_router`, combining every route group
//! - **`auth_routes`** - `/auth` endpoints
//! - **`order_routes`** - `/orders` endpoints

pub mod router;

pub mod auth_routes;

pub mod order_routes;

pub use router::create_router;
