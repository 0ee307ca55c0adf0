//! Transaction Ledger
//!
//! Append-only, ordered log of deposits and withdrawals. Ids are `TXN` plus
//! a 1-based ordinal that keeps growing over the ledger's whole lifetime.

mod transaction;

pub use transaction::{Transaction, TransactionType, TXN_PREFIX};

use chrono::Utc;

use crate::domain::{Amount, DomainError};

#[derive(Debug, Clone)]
pub struct TransactionLedger {
    entries: Vec<Transaction>,
    next_ordinal: u64,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_ordinal: 1,
        }
    }

    /// Rebuild a ledger from persisted entries, in their stored order.
    ///
    /// The next id continues after both the entry count and the highest
    /// ordinal seen, so a hand-edited file can't cause id reuse.
    ///
    /// # Errors
    /// - `DomainError::LedgerExhausted` if the highest ordinal has no successor
    pub fn from_entries(entries: Vec<Transaction>) -> Result<Self, DomainError> {
        let highest = entries
            .iter()
            .filter_map(Transaction::ordinal)
            .max()
            .unwrap_or(0)
            .max(entries.len() as u64);
        let next_ordinal = highest
            .checked_add(1)
            .ok_or_else(|| DomainError::LedgerExhausted(format!("{TXN_PREFIX}{highest}")))?;

        Ok(Self {
            entries,
            next_ordinal,
        })
    }

    /// Append a new entry stamped with the current time.
    ///
    /// The caller has already validated the account and applied the
    /// movement; the ledger trusts it.
    pub fn record(
        &mut self,
        account_number: &str,
        transaction_type: TransactionType,
        amount: Amount,
    ) -> Result<&Transaction, DomainError> {
        let ordinal = self.next_ordinal;
        let transaction_id = format!("{TXN_PREFIX}{ordinal}");
        self.next_ordinal = ordinal
            .checked_add(1)
            .ok_or_else(|| DomainError::LedgerExhausted(transaction_id.clone()))?;

        self.entries.push(Transaction::new(
            transaction_id,
            Utc::now(),
            account_number,
            transaction_type,
            amount,
        ));

        let transaction = &self.entries[self.entries.len() - 1];
        tracing::debug!(
            "Recorded {} for account {}",
            transaction.transaction_id(),
            account_number
        );
        Ok(transaction)
    }

    /// Entries for one account, oldest first.
    ///
    /// The iterator is lazy and cheap to clone; calling this again always
    /// replays the full history.
    pub fn for_account<'a>(
        &'a self,
        account_number: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> + Clone + 'a {
        self.entries
            .iter()
            .filter(move |t| t.account_number() == account_number)
    }

    /// Drop the newest entry and give its id back.
    pub(crate) fn rollback_last(&mut self) -> Option<Transaction> {
        let transaction = self.entries.pop()?;
        self.next_ordinal = self.next_ordinal.saturating_sub(1);
        Some(transaction)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TransactionLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn amount(v: rust_decimal::Decimal) -> Amount {
        Amount::new(v).unwrap()
    }

    #[test]
    fn test_record_generates_sequential_ids() {
        let mut ledger = TransactionLedger::new();

        let first = ledger
            .record("A1", TransactionType::Deposit, amount(dec!(50)))
            .unwrap()
            .transaction_id()
            .to_string();
        let second = ledger
            .record("A2", TransactionType::Withdraw, amount(dec!(10)))
            .unwrap()
            .transaction_id()
            .to_string();

        assert_eq!(first, "TXN1");
        assert_eq!(second, "TXN2");
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_for_account_filters_in_order_and_restarts() {
        let mut ledger = TransactionLedger::new();
        ledger.record("A1", TransactionType::Deposit, amount(dec!(1))).unwrap();
        ledger.record("A2", TransactionType::Deposit, amount(dec!(2))).unwrap();
        ledger.record("A1", TransactionType::Withdraw, amount(dec!(3))).unwrap();

        let history = ledger.for_account("A1");
        let ids: Vec<_> = history.clone().map(|t| t.transaction_id()).collect();
        assert_eq!(ids, ["TXN1", "TXN3"]);

        // Replaying yields the same entries
        assert_eq!(history.count(), 2);
        assert_eq!(ledger.for_account("A1").count(), 2);
        assert_eq!(ledger.for_account("A9").count(), 0);
    }

    #[test]
    fn test_from_entries_continues_numbering() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let entries = vec![
            Transaction::new("TXN1", at, "A1", TransactionType::Deposit, amount(dec!(5))),
            Transaction::new("TXN7", at, "A1", TransactionType::Deposit, amount(dec!(5))),
        ];

        let mut ledger = TransactionLedger::from_entries(entries).unwrap();
        let id = ledger
            .record("A1", TransactionType::Deposit, amount(dec!(1)))
            .unwrap()
            .transaction_id()
            .to_string();

        assert_eq!(id, "TXN8");
    }

    #[test]
    fn test_from_entries_empty() {
        let mut ledger = TransactionLedger::from_entries(Vec::new()).unwrap();
        let id = ledger
            .record("A1", TransactionType::Deposit, amount(dec!(1)))
            .unwrap()
            .transaction_id()
            .to_string();
        assert_eq!(id, "TXN1");
    }

    #[test]
    fn test_rollback_reuses_id() {
        let mut ledger = TransactionLedger::new();
        ledger.record("A1", TransactionType::Deposit, amount(dec!(1))).unwrap();
        ledger.record("A1", TransactionType::Deposit, amount(dec!(2))).unwrap();

        let undone = ledger.rollback_last().unwrap();
        assert_eq!(undone.transaction_id(), "TXN2");

        let redo = ledger
            .record("A1", TransactionType::Deposit, amount(dec!(3)))
            .unwrap();
        assert_eq!(redo.transaction_id(), "TXN2");
    }

    #[test]
    fn test_ids_strictly_increasing() {
        let mut ledger = TransactionLedger::new();
        for i in 0..25 {
            let account = if i % 2 == 0 { "A1" } else { "A2" };
            ledger.record(account, TransactionType::Deposit, amount(dec!(1))).unwrap();
        }

        let ordinals: Vec<u64> = ledger.iter().filter_map(Transaction::ordinal).collect();
        assert_eq!(ordinals.len(), 25);
        assert!(ordinals.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_entries_rejects_ordinal_without_successor() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let last = format!("TXN{}", u64::MAX);
        let entries = vec![Transaction::new(
            last.as_str(),
            at,
            "A1",
            TransactionType::Deposit,
            amount(dec!(5)),
        )];

        let result = TransactionLedger::from_entries(entries);

        assert_eq!(result.err(), Some(DomainError::LedgerExhausted(last)));
    }

    #[test]
    fn test_record_refuses_last_ordinal() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let entries = vec![Transaction::new(
            format!("TXN{}", u64::MAX - 1),
            at,
            "A1",
            TransactionType::Deposit,
            amount(dec!(5)),
        )];
        let mut ledger = TransactionLedger::from_entries(entries).unwrap();

        let result = ledger.record("A1", TransactionType::Deposit, amount(dec!(1)));

        assert!(matches!(result, Err(DomainError::LedgerExhausted(_))));
        assert_eq!(ledger.len(), 1);
    }
}
