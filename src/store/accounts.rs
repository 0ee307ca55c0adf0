//! Account Table
//!
//! Single keyed table for both account kinds, so an account number can only
//! ever be used once. The kind split only exists in the persisted files.

use std::collections::HashMap;

use crate::domain::DomainError;
use crate::model::{Account, CurrentAccount, SavingAccount};

#[derive(Debug, Clone, Default)]
pub struct AccountTable {
    accounts: Vec<Account>,
    index: HashMap<String, usize>,
}

impl AccountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `DuplicateAccount` if the number is taken by either kind.
    pub fn ensure_available(&self, account_number: &str) -> Result<(), DomainError> {
        if self.index.contains_key(account_number) {
            return Err(DomainError::DuplicateAccount(account_number.to_string()));
        }
        Ok(())
    }

    pub fn insert(&mut self, account: Account) -> Result<&Account, DomainError> {
        self.ensure_available(account.account_number())?;

        let position = self.accounts.len();
        self.index
            .insert(account.account_number().to_string(), position);
        self.accounts.push(account);
        Ok(&self.accounts[position])
    }

    pub fn find(&self, account_number: &str) -> Result<&Account, DomainError> {
        self.get(account_number)
            .ok_or_else(|| DomainError::AccountNotFound(account_number.to_string()))
    }

    pub fn get(&self, account_number: &str) -> Option<&Account> {
        self.index.get(account_number).map(|&i| &self.accounts[i])
    }

    pub(crate) fn get_mut(&mut self, account_number: &str) -> Option<&mut Account> {
        let position = *self.index.get(account_number)?;
        Some(&mut self.accounts[position])
    }

    /// Undo the most recent `insert`.
    pub(crate) fn remove_last(&mut self) -> Option<Account> {
        let account = self.accounts.pop()?;
        self.index.remove(account.account_number());
        Some(account)
    }

    pub fn contains(&self, account_number: &str) -> bool {
        self.index.contains_key(account_number)
    }

    /// All accounts in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn savings(&self) -> impl Iterator<Item = &SavingAccount> {
        self.accounts.iter().filter_map(|a| match a {
            Account::Saving(s) => Some(s),
            Account::Current(_) => None,
        })
    }

    pub fn currents(&self) -> impl Iterator<Item = &CurrentAccount> {
        self.accounts.iter().filter_map(|a| match a {
            Account::Current(c) => Some(c),
            Account::Saving(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccountKind;
    use rust_decimal_macros::dec;

    fn saving(number: &str) -> Account {
        Account::open(AccountKind::Saving, number, "C1", dec!(0), None).unwrap()
    }

    fn current(number: &str) -> Account {
        Account::open(AccountKind::Current, number, "C1", dec!(0), Some(dec!(10))).unwrap()
    }

    #[test]
    fn test_number_unique_across_kinds() {
        let mut table = AccountTable::new();
        table.insert(saving("A1")).unwrap();

        let result = table.insert(current("A1"));

        assert_eq!(result, Err(DomainError::DuplicateAccount("A1".to_string())));
        assert_eq!(table.len(), 1);
        assert_eq!(table.find("A1").unwrap().kind(), AccountKind::Saving);
    }

    #[test]
    fn test_kind_views_keep_order() {
        let mut table = AccountTable::new();
        table.insert(saving("S2")).unwrap();
        table.insert(current("K1")).unwrap();
        table.insert(saving("S1")).unwrap();

        let savings: Vec<_> = table.savings().map(|a| a.account_number()).collect();
        let currents: Vec<_> = table.currents().map(|a| a.account_number()).collect();

        assert_eq!(savings, ["S2", "S1"]);
        assert_eq!(currents, ["K1"]);
    }

    #[test]
    fn test_find_missing_and_remove_last() {
        let mut table = AccountTable::new();
        assert_eq!(
            table.find("A9"),
            Err(DomainError::AccountNotFound("A9".to_string()))
        );

        table.insert(saving("A1")).unwrap();
        assert_eq!(table.remove_last().unwrap().account_number(), "A1");
        assert!(!table.contains("A1"));
        assert!(table.is_empty());
    }
}
