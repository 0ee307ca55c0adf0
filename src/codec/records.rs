//! Persisted record shapes
//!
//! One struct per collection, mirroring the JSON written to disk. Decimals
//! are written as strings; numbers are accepted on read.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, DomainError};
use crate::ledger::{Transaction, TransactionType};
use crate::model::{BalanceHolder, CurrentAccount, Customer, SavingAccount};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub name: String,
    pub address: String,
    pub contact: String,
    #[serde(default)]
    pub accounts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingAccountRecord {
    pub account_number: String,
    pub balance: Decimal,
    pub customer_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAccountRecord {
    pub account_number: String,
    pub balance: Decimal,
    pub customer_id: String,
    pub overdraw_limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(alias = "txn_id")]
    pub transaction_id: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub account_number: String,
    #[serde(alias = "txn_type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
}

// =========================================================================
// Domain -> record
// =========================================================================

impl From<&Customer> for CustomerRecord {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_id: customer.customer_id().to_string(),
            name: customer.name().to_string(),
            address: customer.address().to_string(),
            contact: customer.contact().to_string(),
            accounts: customer.accounts().to_vec(),
        }
    }
}

impl From<&SavingAccount> for SavingAccountRecord {
    fn from(account: &SavingAccount) -> Self {
        Self {
            account_number: account.account_number().to_string(),
            balance: account.balance(),
            customer_id: account.customer_id().to_string(),
        }
    }
}

impl From<&CurrentAccount> for CurrentAccountRecord {
    fn from(account: &CurrentAccount) -> Self {
        Self {
            account_number: account.account_number().to_string(),
            balance: account.balance(),
            customer_id: account.customer_id().to_string(),
            overdraw_limit: account.overdraw_limit(),
        }
    }
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            transaction_id: txn.transaction_id().to_string(),
            timestamp: txn.timestamp(),
            account_number: txn.account_number().to_string(),
            transaction_type: txn.transaction_type(),
            amount: txn.amount().value(),
        }
    }
}

// =========================================================================
// Record -> domain
// =========================================================================

impl From<CustomerRecord> for Customer {
    fn from(record: CustomerRecord) -> Self {
        Customer::new(
            record.customer_id,
            record.name,
            record.address,
            record.contact,
        )
        .with_accounts(record.accounts)
    }
}

impl TryFrom<SavingAccountRecord> for SavingAccount {
    type Error = DomainError;

    fn try_from(record: SavingAccountRecord) -> Result<Self, Self::Error> {
        SavingAccount::open(record.account_number, record.customer_id, record.balance)
    }
}

impl TryFrom<CurrentAccountRecord> for CurrentAccount {
    type Error = DomainError;

    fn try_from(record: CurrentAccountRecord) -> Result<Self, Self::Error> {
        CurrentAccount::open(
            record.account_number,
            record.customer_id,
            record.balance,
            record.overdraw_limit,
        )
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = DomainError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let amount = Amount::new(record.amount)?;
        Ok(Transaction::new(
            record.transaction_id,
            record.timestamp,
            record.account_number,
            record.transaction_type,
            amount,
        ))
    }
}

/// RFC 3339 on write; RFC 3339 or offset-less ISO-8601 (read as UTC) on read.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(at) => Ok(at.with_timezone(&Utc)),
            Err(_) => raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_written_as_string() {
        let record = SavingAccountRecord {
            account_number: "A1".to_string(),
            balance: dec!(150.50),
            customer_id: "C1".to_string(),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"account_number":"A1","balance":"150.50","customer_id":"C1"}"#
        );
    }

    #[test]
    fn test_numbers_accepted_on_read() {
        let record: CurrentAccountRecord = serde_json::from_str(
            r#"{"account_number":"A2","balance":-80.0,"customer_id":"C1","overdraw_limit":100}"#,
        )
        .unwrap();

        assert_eq!(record.balance, dec!(-80));
        assert_eq!(record.overdraw_limit, dec!(100));
    }

    #[test]
    fn test_legacy_transaction_fields() {
        let record: TransactionRecord = serde_json::from_str(
            r#"{"txn_id":"TXN3","account_number":"A1","txn_type":"withdraw","amount":25.5,"timestamp":"2024-05-01T12:34:56.250000"}"#,
        )
        .unwrap();

        assert_eq!(record.transaction_id, "TXN3");
        assert_eq!(record.transaction_type, TransactionType::Withdraw);
        assert_eq!(record.amount, dec!(25.5));
        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).unwrap()
                + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn test_legacy_customer_without_accounts_and_extra_fields() {
        let record: CustomerRecord = serde_json::from_str(
            r#"{"customer_id":"C1","name":"Ada","address":"1 Main St","contact":"555"}"#,
        )
        .unwrap();
        assert!(record.accounts.is_empty());

        let saving: SavingAccountRecord = serde_json::from_str(
            r#"{"account_number":"A1","balance":10,"customer_id":"C1","acc_type":"saving","overdraw_limit":0}"#,
        )
        .unwrap();
        assert_eq!(saving.balance, dec!(10));
    }

    #[test]
    fn test_timestamp_written_rfc3339() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let record = TransactionRecord {
            transaction_id: "TXN1".to_string(),
            timestamp: at,
            account_number: "A1".to_string(),
            transaction_type: TransactionType::Deposit,
            amount: dec!(50),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""timestamp":"2026-10-19T08:00:00Z""#));
        assert!(json.contains(r#""transaction_type":"deposit""#));
    }

    #[test]
    fn test_negative_saving_record_rejected() {
        let record = SavingAccountRecord {
            account_number: "A1".to_string(),
            balance: dec!(-1),
            customer_id: "C1".to_string(),
        };
        assert!(SavingAccount::try_from(record).is_err());
    }

    #[test]
    fn test_zero_amount_transaction_rejected() {
        let record = TransactionRecord {
            transaction_id: "TXN1".to_string(),
            timestamp: Utc::now(),
            account_number: "A1".to_string(),
            transaction_type: TransactionType::Deposit,
            amount: Decimal::ZERO,
        };
        assert!(matches!(
            Transaction::try_from(record),
            Err(DomainError::InvalidAmount(_))
        ));
    }
}
