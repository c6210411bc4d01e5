//! Service layer error types

use thiserror::Error;

use roster_core::error::DomainError;
use roster_core::traits::ClientError;

/// Service layer error type
///
/// Most remote-call failures never surface here: they are caught at the point
/// of use and converted into a log entry, a skip, or a sweep classification.
/// What remains is store failures and the wrapped client errors that abort an
/// operation outright.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Chat client failure that aborts an operation
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Caller lacks a required privilege
    #[error("caller lacks required privilege")]
    Unauthorized,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
