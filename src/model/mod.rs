//! Model module
//!
//! Customers and the two account kinds they can own.

pub mod account;
pub mod customer;

pub use account::{Account, AccountKind, CurrentAccount, SavingAccount};
pub use customer::Customer;

use rust_decimal::Decimal;

use crate::domain::{Amount, DomainError};

/// Capability shared by every account kind.
///
/// Implementations must leave the balance untouched when they return an
/// error, and must never let the balance drop below the kind's floor.
pub trait BalanceHolder {
    /// Current balance
    fn balance(&self) -> Decimal;

    /// How much can be withdrawn right now
    fn available(&self) -> Decimal;

    /// Add `amount` to the balance, returning the new balance
    fn deposit(&mut self, amount: &Amount) -> Result<Decimal, DomainError>;

    /// Take `amount` from the balance, returning the new balance
    fn withdraw(&mut self, amount: &Amount) -> Result<Decimal, DomainError>;
}
