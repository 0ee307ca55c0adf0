//! Customer profile

use std::collections::HashSet;

/// A customer and the numbers of the accounts they own, in opening order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    customer_id: String,
    name: String,
    address: String,
    contact: String,
    accounts: Vec<String>,
}

impl Customer {
    pub fn new(
        customer_id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            address: address.into(),
            contact: contact.into(),
            accounts: Vec::new(),
        }
    }

    /// Restore a customer together with an already-known account list
    pub fn with_accounts(mut self, accounts: Vec<String>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn accounts(&self) -> &[String] {
        &self.accounts
    }

    pub fn owns(&self, account_number: &str) -> bool {
        self.accounts.iter().any(|a| a == account_number)
    }

    pub(crate) fn push_account(&mut self, account_number: String) {
        self.accounts.push(account_number);
    }

    pub(crate) fn pop_account(&mut self) -> Option<String> {
        self.accounts.pop()
    }

    /// Drop repeated account numbers, keeping first occurrences in order.
    /// Returns how many entries were removed.
    pub(crate) fn dedup_accounts(&mut self) -> usize {
        let before = self.accounts.len();
        let mut seen = HashSet::new();
        self.accounts.retain(|number| seen.insert(number.clone()));
        before - self.accounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_accounts_keep_order() {
        let mut customer = Customer::new("C1", "Ada", "1 Main St", "555-0100");
        customer.push_account("A2".to_string());
        customer.push_account("A1".to_string());

        assert_eq!(customer.accounts(), ["A2", "A1"]);
        assert!(customer.owns("A1"));
        assert!(!customer.owns("A3"));
    }

    #[test]
    fn test_dedup_accounts_keeps_first_occurrence() {
        let mut customer = Customer::new("C1", "Ada", "", "").with_accounts(vec![
            "A1".to_string(),
            "A2".to_string(),
            "A1".to_string(),
        ]);

        assert_eq!(customer.dedup_accounts(), 1);
        assert_eq!(customer.accounts(), ["A1", "A2"]);
        assert_eq!(customer.dedup_accounts(), 0);
    }
}
