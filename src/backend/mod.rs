//! Backend Module
//!
//! Server-side code: the Axum HTTP server, authentication, orders and the
//! shared error type.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── main.rs         - Server entry point
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Route definitions
//! ├── middleware/     - Auth middleware, per-request session
//! ├── auth/           - Users, tokens, auth endpoints
//! ├── orders/         - Orders, items, order endpoints
//! └── error/          - BackendError and its HTTP rendering
//! ```

/// Server initialization and configuration
pub mod server;

/// Route definitions
pub mod routes;

/// HTTP middleware and extractors
pub mod middleware;

/// Authentication and user management
pub mod auth;

/// Orders and order items
pub mod orders;

/// Error types
pub mod error;
