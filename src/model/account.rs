//! Account Model
//!
//! Saving accounts hold a plain non-negative balance. Current accounts may
//! be overdrawn down to `-overdraw_limit`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{Amount, Balance, DomainError};

use super::BalanceHolder;

/// Account kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Saving,
    Current,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Saving => "saving",
            AccountKind::Current => "current",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "saving" => Ok(AccountKind::Saving),
            "current" => Ok(AccountKind::Current),
            _ => Err(DomainError::InvalidKind(s.trim().to_string())),
        }
    }
}

fn validate_number(account_number: &str) -> Result<(), DomainError> {
    if account_number.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "account number must not be blank".to_string(),
        ));
    }
    Ok(())
}

fn check_opening_balance(balance: Decimal, floor: Decimal) -> Result<(), DomainError> {
    if balance < floor {
        return Err(DomainError::InvalidInitialBalance { balance, floor });
    }
    Ok(())
}

// =========================================================================
// Saving
// =========================================================================

/// Plain-balance account; never goes below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingAccount {
    account_number: String,
    customer_id: String,
    balance: Balance,
}

impl SavingAccount {
    /// Open a saving account with an opening balance of at least zero.
    pub fn open(
        account_number: impl Into<String>,
        customer_id: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<Self, DomainError> {
        let account_number = account_number.into();
        validate_number(&account_number)?;
        check_opening_balance(initial_balance, Decimal::ZERO)?;

        Ok(Self {
            account_number,
            customer_id: customer_id.into(),
            balance: Balance::new(initial_balance),
        })
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }
}

impl BalanceHolder for SavingAccount {
    fn balance(&self) -> Decimal {
        self.balance.value()
    }

    fn available(&self) -> Decimal {
        self.balance.value()
    }

    fn deposit(&mut self, amount: &Amount) -> Result<Decimal, DomainError> {
        self.balance = self.balance.credit(amount)?;
        Ok(self.balance.value())
    }

    fn withdraw(&mut self, amount: &Amount) -> Result<Decimal, DomainError> {
        if amount.value() > self.available() {
            return Err(DomainError::insufficient_funds(
                amount.value(),
                self.available(),
            ));
        }
        self.balance = self.balance.debit(amount)?;
        Ok(self.balance.value())
    }
}

// =========================================================================
// Current
// =========================================================================

/// Overdraft-enabled account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAccount {
    account_number: String,
    customer_id: String,
    balance: Balance,
    overdraw_limit: Decimal,
}

impl CurrentAccount {
    /// Open a current account. The limit must be non-negative and the
    /// opening balance must not already be below `-overdraw_limit`.
    pub fn open(
        account_number: impl Into<String>,
        customer_id: impl Into<String>,
        initial_balance: Decimal,
        overdraw_limit: Decimal,
    ) -> Result<Self, DomainError> {
        let account_number = account_number.into();
        validate_number(&account_number)?;
        if overdraw_limit < Decimal::ZERO {
            return Err(DomainError::InvalidOverdrawLimit(overdraw_limit));
        }
        check_opening_balance(initial_balance, -overdraw_limit)?;

        Ok(Self {
            account_number,
            customer_id: customer_id.into(),
            balance: Balance::new(initial_balance),
            overdraw_limit,
        })
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn overdraw_limit(&self) -> Decimal {
        self.overdraw_limit
    }
}

impl BalanceHolder for CurrentAccount {
    fn balance(&self) -> Decimal {
        self.balance.value()
    }

    /// Saturates at `Decimal::MAX` for extreme balance and limit pairs.
    fn available(&self) -> Decimal {
        self.balance.value().saturating_add(self.overdraw_limit)
    }

    fn deposit(&mut self, amount: &Amount) -> Result<Decimal, DomainError> {
        self.balance = self.balance.credit(amount)?;
        Ok(self.balance.value())
    }

    fn withdraw(&mut self, amount: &Amount) -> Result<Decimal, DomainError> {
        if amount.value() > self.available() {
            return Err(DomainError::insufficient_funds(
                amount.value(),
                self.available(),
            ));
        }
        self.balance = self.balance.debit(amount)?;
        Ok(self.balance.value())
    }
}

// =========================================================================
// Account
// =========================================================================

/// Any account held by the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Saving(SavingAccount),
    Current(CurrentAccount),
}

impl Account {
    /// Open an account of the given kind.
    ///
    /// `overdraw_limit` is required for current accounts and ignored for
    /// saving accounts.
    pub fn open(
        kind: AccountKind,
        account_number: impl Into<String>,
        customer_id: impl Into<String>,
        initial_balance: Decimal,
        overdraw_limit: Option<Decimal>,
    ) -> Result<Self, DomainError> {
        match kind {
            AccountKind::Saving => {
                SavingAccount::open(account_number, customer_id, initial_balance)
                    .map(Account::Saving)
            }
            AccountKind::Current => {
                let limit = overdraw_limit.ok_or(DomainError::MissingOverdrawLimit)?;
                CurrentAccount::open(account_number, customer_id, initial_balance, limit)
                    .map(Account::Current)
            }
        }
    }

    pub fn account_number(&self) -> &str {
        match self {
            Account::Saving(a) => a.account_number(),
            Account::Current(a) => a.account_number(),
        }
    }

    pub fn customer_id(&self) -> &str {
        match self {
            Account::Saving(a) => a.customer_id(),
            Account::Current(a) => a.customer_id(),
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Account::Saving(_) => AccountKind::Saving,
            Account::Current(_) => AccountKind::Current,
        }
    }

    /// Overdraw limit, `None` for saving accounts
    pub fn overdraw_limit(&self) -> Option<Decimal> {
        match self {
            Account::Saving(_) => None,
            Account::Current(a) => Some(a.overdraw_limit()),
        }
    }

    /// Lowest balance this account may reach
    pub fn floor(&self) -> Decimal {
        -self.overdraw_limit().unwrap_or(Decimal::ZERO)
    }
}

impl BalanceHolder for Account {
    fn balance(&self) -> Decimal {
        match self {
            Account::Saving(a) => a.balance(),
            Account::Current(a) => a.balance(),
        }
    }

    fn available(&self) -> Decimal {
        match self {
            Account::Saving(a) => a.available(),
            Account::Current(a) => a.available(),
        }
    }

    fn deposit(&mut self, amount: &Amount) -> Result<Decimal, DomainError> {
        match self {
            Account::Saving(a) => a.deposit(amount),
            Account::Current(a) => a.deposit(amount),
        }
    }

    fn withdraw(&mut self, amount: &Amount) -> Result<Decimal, DomainError> {
        match self {
            Account::Saving(a) => a.withdraw(amount),
            Account::Current(a) => a.withdraw(amount),
        }
    }
}
