//! Repository error type.
//!
//! Wraps the domain errors raised by `neraca-core` rules together with
//! storage failures, and maps both onto the shared [`AppError`] taxonomy.

use neraca_core::inventory::InventoryError;
use neraca_core::ledger::LedgerError;
use neraca_shared::AppError;
use sea_orm::{DbErr, SqlErr};

/// Error returned by every repository operation.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A ledger rule rejected the operation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// An inventory rule rejected the operation.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// A stored value could not be read back into a domain type.
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Result alias for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(err) => err.error_code(),
            Self::Inventory(err) => err.error_code(),
            Self::Corrupt(_) => "CORRUPT_DATA",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Ledger(err) => err.into(),
            RepositoryError::Inventory(err) => err.into(),
            RepositoryError::Corrupt(message) => Self::Internal(message),
            RepositoryError::Database(err) => Self::Database(err.to_string()),
        }
    }
}

/// Returns true if the error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
