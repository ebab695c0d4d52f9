//! Application-wide error types.
//!
//! Every failure that crosses a use-case boundary is one of these variants.
//! Callers branch on the variant (or on [`AppError::error_code`]) and show the
//! message to the user.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or inconsistent input (unbalanced journal, bad quantity).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The target fiscal period is closed.
    #[error("Period closed: {0}")]
    PeriodClosed(String),

    /// Illegal state transition or duplicate.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requested quantity exceeds available stock.
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Business rule violation (deleting an account in use).
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::Conflict(_) => "CONFLICT",
            Self::InsufficientStock(_) => "INSUFFICIENT_STOCK",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for errors the caller caused and can fix by changing the
    /// request, as opposed to infrastructure failures.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }
}
