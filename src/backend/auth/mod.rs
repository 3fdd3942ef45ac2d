//! Authentication Module
//!
//! User storage, token issuance and the HTTP endpoints that tie them
//! together.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT issuance and verification
//! ├── gateway.rs      - Registration and login flows
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → password hashed → user stored
//! 2. **Login**: email and password → hash verified → access and refresh token
//! 3. **Refresh**: bearer token → verified by middleware → new access token

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Registration and login flows
pub mod gateway;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{home, login, login_form, refresh, register};
