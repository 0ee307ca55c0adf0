//! Command definitions
//!
//! Commands carry the user's intent from the shell into the bank.

use rust_decimal::Decimal;

/// Command to register a new customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCustomerCommand {
    pub customer_id: String,
    pub name: String,
    pub address: String,
    pub contact: String,
}

impl CreateCustomerCommand {
    pub fn new(customer_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            address: String::new(),
            contact: String::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }
}

/// Command to open an account for an existing customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAccountCommand {
    pub customer_id: String,
    pub account_number: String,
    /// `saving` or `current`, as typed by the user
    pub kind: String,
    pub initial_balance: Decimal,
    /// Required for current accounts
    pub overdraw_limit: Option<Decimal>,
}

impl OpenAccountCommand {
    pub fn new(
        customer_id: impl Into<String>,
        account_number: impl Into<String>,
        kind: impl Into<String>,
        initial_balance: Decimal,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            account_number: account_number.into(),
            kind: kind.into(),
            initial_balance,
            overdraw_limit: None,
        }
    }

    pub fn with_overdraw_limit(mut self, limit: Decimal) -> Self {
        self.overdraw_limit = Some(limit);
        self
    }
}
