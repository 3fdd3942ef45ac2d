//! Authentication Handlers Module
//!
//! HTTP handlers for the `/auth` endpoints.
//!
//! # Handlers
//!
//! - **`home`** - GET /auth/ - Static greeting
//! - **`register`** - POST /auth/register - User registration
//! - **`login`** - POST /auth/login - JSON login, access and refresh token
//! - **`login_form`** - POST /auth/login-form - Form login, access token only
//! - **`refresh`** - GET /auth/refresh - New access token for a bearer token
//!
//! Handlers that touch the database take a `DbSession` and commit it before
//! answering; any error drops the session and rolls it back.

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handlers
pub mod login;

/// Token refresh handler
pub mod refresh;

pub use types::{LoginForm, LoginRequest, LoginResponse, RegisterRequest};

pub use login::{login, login_form};
pub use refresh::refresh;
pub use register::{home, register};
