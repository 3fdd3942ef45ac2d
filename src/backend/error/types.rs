/**
 * Backend Error Types
 *
 * This module defines the errors the backend reports to callers.
 * Every failure is terminal for the request and is rendered as a status code
 * plus message; nothing is retried.
 *
 * # Error Categories
 *
 * ## Domain Errors
 *
 * Business-rule failures produced by the auth gateway and the order
 * lifecycle: duplicate registration, bad credentials, bad or missing tokens,
 * missing rows, permission failures, invalid status names and attempts to
 * change items of an order that is no longer pending.
 *
 * ## Infrastructure Errors
 *
 * Database, password hashing and token signing failures. Their details are
 * logged and the caller only sees a generic 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::shared::orders::{assignable_statuses, OrderStatus};

/// Backend error type
///
/// # Status Code Mapping
///
/// | Variant              | Status |
/// |----------------------|--------|
/// | `DuplicateEmail`     | 400    |
/// | `InvalidCredentials` | 400    |
/// | `NotFound`           | 400    |
/// | `InvalidStatus`      | 400    |
/// | `InvalidState`       | 400    |
/// | `Unauthenticated`    | 401    |
/// | `InvalidToken`       | 401    |
/// | `Forbidden`          | 401    |
/// | `UnknownUser`        | 404    |
/// | `Rejected`           | from the extractor (400, 415, 422) |
/// | infrastructure       | 500    |
#[derive(Debug, Error)]
pub enum BackendError {
    /// Registration with an email that is already taken
    #[error("Email already registered")]
    DuplicateEmail,

    /// Login with an unknown email or a wrong password
    #[error("User not found or invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a protected route
    #[error("Not authenticated")]
    Unauthenticated,

    /// Bearer token is malformed, expired or badly signed
    #[error("Access denied, verify the validity of your token")]
    InvalidToken(#[from] TokenError),

    /// Token verified but its subject no longer exists
    #[error("User invalid")]
    UnknownUser,

    /// Referenced row does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Caller lacks the role or ownership required for the action
    #[error("You do not have permission to {0}")]
    Forbidden(&'static str),

    /// Requested status is not one of the assignable statuses
    #[error("Status must be one of [{allowed}], got {0}", allowed = assignable_statuses())]
    InvalidStatus(String),

    /// Items can only change while the order is pending
    #[error("You cannot {action} items when the order status is {status}")]
    InvalidState {
        /// `add` or `remove`
        action: &'static str,
        /// Current status of the order
        status: OrderStatus,
    },

    /// Path, query or body could not be parsed
    #[error("{message}")]
    Rejected {
        /// Status chosen by the rejecting extractor
        status: StatusCode,
        message: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification error
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Token signing error
    #[error("Token signing error: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),
}

impl BackendError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateEmail
            | Self::InvalidCredentials
            | Self::NotFound(_)
            | Self::InvalidStatus(_)
            | Self::InvalidState { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::InvalidToken(_) | Self::Forbidden(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::UnknownUser => StatusCode::NOT_FOUND,
            Self::Rejected { status, .. } => *status,
            Self::Database(_) | Self::Hashing(_) | Self::TokenSigning(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message reported to the caller
    ///
    /// Infrastructure errors are reported generically; their details only
    /// reach the logs.
    pub fn message(&self) -> String {
        if self.is_internal() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    /// Whether this error is an infrastructure failure rather than a rejected request
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::DuplicateEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BackendError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BackendError::NotFound("Order").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BackendError::InvalidStatus("PENDING".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackendError::Forbidden("view this order").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::InvalidToken(TokenError::Expired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(BackendError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::UnknownUser.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BackendError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_messages_are_reported_verbatim() {
        let error = BackendError::InvalidState {
            action: "add",
            status: OrderStatus::Completed,
        };
        assert_eq!(
            error.message(),
            "You cannot add items when the order status is COMPLETED"
        );

        let error = BackendError::InvalidStatus("PENDING".into());
        assert_eq!(
            error.message(),
            "Status must be one of [IN_PROGRESS, CANCELLED, COMPLETED], got PENDING"
        );

        assert_eq!(BackendError::NotFound("Order").message(), "Order not found");
    }

    #[test]
    fn test_rejection_keeps_extractor_status() {
        let error = BackendError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `quantity`".to_string(),
        };
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!error.is_internal());
        assert_eq!(error.message(), "missing field `quantity`");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let error = BackendError::Database(sqlx::Error::PoolTimedOut);
        assert!(error.is_internal());
        assert_eq!(error.message(), "Internal server error");
    }
}
