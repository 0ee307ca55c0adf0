//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

use super::AmountError;

/// Domain-specific errors
///
/// These errors represent business rule violations and domain invariant failures.
/// Every one of them is recovered at the operation boundary: the operation is
/// rejected and no state is changed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Customer not found
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Customer id already registered
    #[error("Customer already exists: {0}")]
    DuplicateCustomer(String),

    /// Account number already used by a saving or current account
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    /// Invalid amount (zero, negative, or exceeds limit)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Withdrawal exceeds what the account may pay out
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    /// Unrecognized account kind
    #[error("Invalid account type: {0} (expected saving or current)")]
    InvalidKind(String),

    /// Current account opened without an overdraw limit
    #[error("Current accounts require an overdraw limit")]
    MissingOverdrawLimit,

    #[error("Overdraw limit must not be negative (got {0})")]
    InvalidOverdrawLimit(Decimal),

    /// Opening balance already breaks the account's floor
    #[error("Initial balance {balance} is below the allowed minimum {floor}")]
    InvalidInitialBalance { balance: Decimal, floor: Decimal },

    /// No transaction id is left after this one
    #[error("Transaction ids exhausted after {0}")]
    LedgerExhausted(String),

    /// Malformed identifier or field
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Create an insufficient funds error
    pub fn insufficient_funds(requested: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }

    /// Check if this is a missing customer or account
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CustomerNotFound(_) | Self::AccountNotFound(_))
    }

    /// Check if this is an identity collision
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateCustomer(_) | Self::DuplicateAccount(_)
        )
    }
}

impl From<AmountError> for DomainError {
    fn from(err: AmountError) -> Self {
        Self::InvalidAmount(err.to_string())
    }
}
