//! Order Status
//!
//! The status an order moves through during its lifetime. Orders are created
//! `PENDING`; while pending their items may change. An administrator may move
//! an order to any of the assignable statuses, from any current status, and
//! once an order leaves `PENDING` its items are frozen.
//!
//! Statuses travel as their upper-case names, both on the wire and in the
//! `orders.status` column.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Newly created, items may still be added or removed
    Pending,
    /// Being prepared
    InProgress,
    /// Cancelled by an administrator
    Cancelled,
    /// Delivered / closed
    Completed,
}

/// Error returned when a status name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl OrderStatus {
    /// Statuses an administrator may assign through a status update.
    ///
    /// Excludes `PENDING`, so an order can never be reopened.
    pub const ASSIGNABLE: [OrderStatus; 3] = [
        OrderStatus::InProgress,
        OrderStatus::Cancelled,
        OrderStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InProgress => "IN_PROGRESS",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    /// Whether this status may be the target of a status update
    pub fn is_assignable(&self) -> bool {
        Self::ASSIGNABLE.contains(self)
    }

    /// Whether items may be added to or removed from an order in this status
    pub fn allows_item_changes(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "IN_PROGRESS" => Ok(OrderStatus::InProgress),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            "COMPLETED" => Ok(OrderStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Comma separated list of the assignable statuses, for error messages
pub fn assignable_statuses() -> String {
    OrderStatus::ASSIGNABLE
        .iter()
        .map(OrderStatus::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
