//! Common test utilities and helpers
//!
//! - Database and application fixtures
//! - Authentication helpers

#![allow(dead_code)]

pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;
pub use database::*;
