//! orderflow - Order Management Backend
//!
//! An HTTP backend for placing and managing orders. Users register and log
//! in with email and password, receive signed JWT access and refresh
//! tokens, and use them to create orders, add and remove items, and (as
//! administrators) move orders through their statuses.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependencies
//!   - `OrderStatus` and its parsing rules
//!
//! - **`backend`** - Axum server
//!   - Configuration, state and router
//!   - Token service and auth gateway
//!   - Order lifecycle rules and persistence
//!
//! # Usage
//!
//! ```rust,no_run
//! use orderflow::backend::server::{create_app, AppConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every failure surfaces as a `backend::error::BackendError`, rendered as
//! `{"error": ..., "status": ...}` with the matching HTTP status.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
