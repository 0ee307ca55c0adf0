//! Error handling module
//!
//! Centralized error type returned by bank operations.

use crate::domain::DomainError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Business rule rejected the operation; nothing was changed
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Loading or saving failed
    #[error("Storage error: {0}")]
    Storage(#[from] crate::store::StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be understood (e.g. a non-numeric amount)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Stable snake_case code, used as a log field
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Domain(domain_err) => match domain_err {
                DomainError::CustomerNotFound(_) => "customer_not_found",
                DomainError::AccountNotFound(_) => "account_not_found",
                DomainError::DuplicateCustomer(_) => "duplicate_customer",
                DomainError::DuplicateAccount(_) => "duplicate_account",
                DomainError::InvalidAmount(_) => "invalid_amount",
                DomainError::InsufficientFunds { .. } => "insufficient_funds",
                DomainError::InvalidKind(_) => "invalid_kind",
                DomainError::MissingOverdrawLimit => "missing_overdraw_limit",
                DomainError::InvalidOverdrawLimit(_) => "invalid_overdraw_limit",
                DomainError::InvalidInitialBalance { .. } => "invalid_initial_balance",
                DomainError::LedgerExhausted(_) => "ledger_exhausted",
                DomainError::InvalidInput(_) => "invalid_input",
            },
            AppError::Storage(_) => "storage_error",
            AppError::Config(_) => "config_error",
            AppError::Io(_) => "io_error",
            AppError::InvalidInput(_) => "invalid_input",
        }
    }

    /// The domain error, if this is one
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(e) => Some(e),
            _ => None,
        }
    }

    /// Check if the operation was rejected by a business rule
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Domain(_) | AppError::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_domain_error_is_transparent() {
        let err: AppError = DomainError::AccountNotFound("A9".to_string()).into();

        assert_eq!(err.to_string(), "Account not found: A9");
        assert_eq!(err.code(), "account_not_found");
        assert!(err.is_rejection());
        assert!(err.as_domain().is_some_and(DomainError::is_not_found));
    }

    #[test]
    fn test_storage_error_is_not_rejection() {
        let err: AppError =
            crate::store::StorageError::Unavailable("disk full".to_string()).into();

        assert_eq!(err.code(), "storage_error");
        assert!(!err.is_rejection());
        assert!(err.as_domain().is_none());
    }

    #[test]
    fn test_insufficient_funds_code() {
        let err = AppError::from(DomainError::insufficient_funds(
            Decimal::new(200, 0),
            Decimal::new(150, 0),
        ));
        assert_eq!(err.code(), "insufficient_funds");
    }
}
