//! Ledger Record Codec
//!
//! Encodes customers, accounts and transactions as one JSON object per line
//! and decodes them back in file order. Blank lines are ignored on read.

mod error;
pub mod records;

pub use error::CodecError;
pub use records::{CurrentAccountRecord, CustomerRecord, SavingAccountRecord, TransactionRecord};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::ledger::Transaction;
use crate::model::{CurrentAccount, Customer, SavingAccount};

/// The four independently persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Customers,
    SavingAccounts,
    CurrentAccounts,
    Transactions,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Customers,
        Collection::SavingAccounts,
        Collection::CurrentAccounts,
        Collection::Transactions,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Customers => "customers",
            Collection::SavingAccounts => "saving_accounts",
            Collection::CurrentAccounts => "current_accounts",
            Collection::Transactions => "transactions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =========================================================================
// Generic line handling
// =========================================================================

/// Serialize records, one per line, each line newline-terminated.
pub fn encode<R, I>(collection: Collection, records: I) -> Result<String, CodecError>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let mut out = String::new();
    for record in records {
        let line = serde_json::to_string(&record)
            .map_err(|source| CodecError::Encode { collection, source })?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Parse records in file order, paired with their 1-based line numbers.
pub fn decode<R>(collection: Collection, text: &str) -> Result<Vec<(usize, R)>, CodecError>
where
    R: DeserializeOwned,
{
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map(|record| (i + 1, record))
                .map_err(|source| CodecError::Malformed {
                    collection,
                    line: i + 1,
                    source,
                })
        })
        .collect()
}

fn decode_into<R, T>(collection: Collection, text: &str) -> Result<Vec<T>, CodecError>
where
    R: DeserializeOwned,
    T: TryFrom<R>,
    T::Error: fmt::Display,
{
    decode::<R>(collection, text)?
        .into_iter()
        .map(|(line, record)| {
            T::try_from(record).map_err(|e| CodecError::InvalidRecord {
                collection,
                line,
                reason: e.to_string(),
            })
        })
        .collect()
}

// =========================================================================
// Per-collection helpers
// =========================================================================

pub fn encode_customers<'a>(
    customers: impl IntoIterator<Item = &'a Customer>,
) -> Result<String, CodecError> {
    encode(
        Collection::Customers,
        customers.into_iter().map(CustomerRecord::from),
    )
}

pub fn decode_customers(text: &str) -> Result<Vec<Customer>, CodecError> {
    decode_into::<CustomerRecord, Customer>(Collection::Customers, text)
}

pub fn encode_saving_accounts<'a>(
    accounts: impl IntoIterator<Item = &'a SavingAccount>,
) -> Result<String, CodecError> {
    encode(
        Collection::SavingAccounts,
        accounts.into_iter().map(SavingAccountRecord::from),
    )
}

pub fn decode_saving_accounts(text: &str) -> Result<Vec<SavingAccount>, CodecError> {
    decode_into::<SavingAccountRecord, SavingAccount>(Collection::SavingAccounts, text)
}

pub fn encode_current_accounts<'a>(
    accounts: impl IntoIterator<Item = &'a CurrentAccount>,
) -> Result<String, CodecError> {
    encode(
        Collection::CurrentAccounts,
        accounts.into_iter().map(CurrentAccountRecord::from),
    )
}

pub fn decode_current_accounts(text: &str) -> Result<Vec<CurrentAccount>, CodecError> {
    decode_into::<CurrentAccountRecord, CurrentAccount>(Collection::CurrentAccounts, text)
}

pub fn encode_transactions<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<String, CodecError> {
    encode(
        Collection::Transactions,
        transactions.into_iter().map(TransactionRecord::from),
    )
}

pub fn decode_transactions(text: &str) -> Result<Vec<Transaction>, CodecError> {
    decode_into::<TransactionRecord, Transaction>(Collection::Transactions, text)
}
