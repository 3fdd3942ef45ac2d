//! Middleware Module
//!
//! - **`auth`** - Bearer token middleware and the `AuthUser` extractor
//! - **`session`** - `DbSession`, the per-request transaction extractor
//! - **`extract`** - `Path`/`Query`/`Json`/`Form` wrappers with JSON rejections

pub mod auth;

pub mod session;

pub mod extract;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use extract::{ApiForm, ApiJson, ApiPath, ApiQuery};
pub use session::DbSession;
