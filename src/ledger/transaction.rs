//! Transaction records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{Amount, DomainError};

/// Prefix of every transaction id
pub const TXN_PREFIX: &str = "TXN";

/// Direction of a monetary movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdraw,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(TransactionType::Deposit),
            "withdraw" => Ok(TransactionType::Withdraw),
            other => Err(DomainError::InvalidInput(format!(
                "unknown transaction type: {other}"
            ))),
        }
    }
}

/// An immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    transaction_id: String,
    timestamp: DateTime<Utc>,
    account_number: String,
    transaction_type: TransactionType,
    amount: Amount,
}

impl Transaction {
    pub fn new(
        transaction_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        account_number: impl Into<String>,
        transaction_type: TransactionType,
        amount: Amount,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            timestamp,
            account_number: account_number.into(),
            transaction_type,
            amount,
        }
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// Numeric part of the id (`TXN12` -> 12)
    pub fn ordinal(&self) -> Option<u64> {
        self.transaction_id
            .strip_prefix(TXN_PREFIX)
            .and_then(|n| n.parse().ok())
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.transaction_id,
            self.transaction_type,
            self.amount,
            self.timestamp.to_rfc3339()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ordinal() {
        let amount = Amount::new(dec!(5)).unwrap();
        let txn = Transaction::new("TXN12", Utc::now(), "A1", TransactionType::Deposit, amount);
        assert_eq!(txn.ordinal(), Some(12));

        let odd = Transaction::new("X-1", Utc::now(), "A1", TransactionType::Deposit, amount);
        assert_eq!(odd.ordinal(), None);
    }

    #[test]
    fn test_transaction_type_serde() {
        let json = serde_json::to_string(&TransactionType::Withdraw).unwrap();
        assert_eq!(json, r#""withdraw""#);
        assert_eq!("Deposit".parse::<TransactionType>().unwrap(), TransactionType::Deposit);
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
