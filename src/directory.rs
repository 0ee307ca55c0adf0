//! Customer Directory
//!
//! Maps customer ids to profiles. Iteration follows creation order, which is
//! also the order customers are written back to storage.

use std::collections::HashMap;

use crate::domain::DomainError;
use crate::model::Customer;

#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
    index: HashMap<String, usize>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new customer.
    ///
    /// # Errors
    /// - `DomainError::InvalidInput` if the id is blank
    /// - `DomainError::DuplicateCustomer` if the id is already registered
    pub fn create(
        &mut self,
        customer_id: &str,
        name: &str,
        address: &str,
        contact: &str,
    ) -> Result<&Customer, DomainError> {
        self.insert(Customer::new(customer_id, name, address, contact))
    }

    /// Insert a fully built customer (used when loading from storage).
    pub fn insert(&mut self, customer: Customer) -> Result<&Customer, DomainError> {
        let id = customer.customer_id();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "customer id must not be blank".to_string(),
            ));
        }
        if self.index.contains_key(id) {
            return Err(DomainError::DuplicateCustomer(id.to_string()));
        }

        let position = self.customers.len();
        self.index.insert(id.to_string(), position);
        self.customers.push(customer);
        Ok(&self.customers[position])
    }

    pub fn find(&self, customer_id: &str) -> Result<&Customer, DomainError> {
        self.get(customer_id)
            .ok_or_else(|| DomainError::CustomerNotFound(customer_id.to_string()))
    }

    pub fn get(&self, customer_id: &str) -> Option<&Customer> {
        self.index.get(customer_id).map(|&i| &self.customers[i])
    }

    pub fn contains(&self, customer_id: &str) -> bool {
        self.index.contains_key(customer_id)
    }

    /// Append an account number to the customer's owned accounts.
    pub fn add_account(&mut self, customer_id: &str, account_number: &str) -> Result<(), DomainError> {
        let position = *self
            .index
            .get(customer_id)
            .ok_or_else(|| DomainError::CustomerNotFound(customer_id.to_string()))?;
        self.customers[position].push_account(account_number.to_string());
        Ok(())
    }

    /// Undo the most recent `add_account` for this customer.
    pub(crate) fn unlink_last_account(&mut self, customer_id: &str) {
        if let Some(&position) = self.index.get(customer_id) {
            self.customers[position].pop_account();
        }
    }

    /// Collapse repeated entries in every customer's account list.
    pub(crate) fn dedup_account_lists(&mut self) {
        for customer in &mut self.customers {
            let removed = customer.dedup_accounts();
            if removed > 0 {
                tracing::warn!(
                    "Dropped {} repeated account entries for customer {}",
                    removed,
                    customer.customer_id()
                );
            }
        }
    }

    /// Undo the most recent `create`.
    pub(crate) fn remove_last(&mut self) -> Option<Customer> {
        let customer = self.customers.pop()?;
        self.index.remove(customer.customer_id());
        Some(customer)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
