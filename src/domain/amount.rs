//! Money primitives
//!
//! `Amount` is the size of a single deposit or withdrawal and can only hold
//! a value the bank is willing to move. `Balance` is the signed running
//! total of an account; whether it may go negative is up to the account.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, strictly positive movement of money.
///
/// Any positive decimal is accepted as written; overflow is caught when the
/// amount is applied to a [`Balance`].
///
/// ```
/// use bank_ledger::domain::{Amount, AmountError};
/// use rust_decimal::Decimal;
///
/// assert!(Amount::new(Decimal::new(2550, 2)).is_ok());
/// assert_eq!(Amount::new(Decimal::ZERO), Err(AmountError::NotPositive(Decimal::ZERO)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

/// Why a value cannot be used as an [`Amount`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount must be greater than zero (got {0})")]
    NotPositive(Decimal),

    #[error("balance would overflow")]
    Overflow,
}

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

/// Signed account balance. Arithmetic is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Balance(Decimal);

impl Balance {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn credit(&self, amount: &Amount) -> Result<Self, AmountError> {
        self.0
            .checked_add(amount.value())
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    /// May produce a negative balance; callers enforce their own floor.
    pub fn debit(&self, amount: &Amount) -> Result<Self, AmountError> {
        self.0
            .checked_sub(amount.value())
            .map(Self)
            .ok_or(AmountError::Overflow)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rejects_only_non_positive_values() {
        assert_eq!(Amount::new(dec!(0)), Err(AmountError::NotPositive(dec!(0))));
        assert_eq!(Amount::new(dec!(-5)), Err(AmountError::NotPositive(dec!(-5))));
        assert_eq!(
            Amount::new(dec!(-0.000000001)),
            Err(AmountError::NotPositive(dec!(-0.000000001)))
        );
    }

    #[test]
    fn test_accepts_tiny_and_huge_values() {
        for value in [dec!(0.000000001), dec!(33.333333333), dec!(2000000000000), Decimal::MAX] {
            assert_eq!(Amount::new(value).unwrap().value(), value);
        }
        assert_eq!(
            Amount::new(dec!(50.000000000)).unwrap().to_string(),
            "50.000000000"
        );
    }

    #[test]
    fn test_serde_validates() {
        let amount: Amount = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(amount.value(), dec!(12.5));
        assert!(serde_json::from_str::<Amount>("\"-1\"").is_err());
    }

    #[test]
    fn test_balance_may_go_negative() {
        let balance = Balance::new(dec!(100))
            .debit(&Amount::new(dec!(130)).unwrap())
            .unwrap();
        assert_eq!(balance.value(), dec!(-30));

        let balance = balance.credit(&Amount::new(dec!(30)).unwrap()).unwrap();
        assert_eq!(balance, Balance::default());
    }

    #[test]
    fn test_balance_overflow() {
        let result = Balance::new(Decimal::MAX).credit(&Amount::new(dec!(1)).unwrap());
        assert_eq!(result, Err(AmountError::Overflow));
    }
}
