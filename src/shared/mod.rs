//! Shared Module
//!
//! Types that carry no server dependencies.

/// Order status values
pub mod orders;

pub use orders::{OrderStatus, UnknownStatus};
