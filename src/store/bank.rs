//! Bank Store
//!
//! Owns the customer directory, the account table and the transaction
//! ledger for the lifetime of the process. State is loaded once by
//! [`Bank::open`], every mutating operation rewrites the collections it
//! touched, and [`Bank::close`] performs a final full save.

use rust_decimal::Decimal;

use crate::codec::{self, Collection};
use crate::directory::CustomerDirectory;
use crate::domain::{Amount, DomainError};
use crate::error::{AppError, AppResult};
use crate::ledger::{Transaction, TransactionLedger, TransactionType};
use crate::model::{Account, AccountKind, BalanceHolder, Customer};

use super::{AccountTable, CreateCustomerCommand, OpenAccountCommand, Storage, StorageError};

pub struct Bank<S: Storage> {
    storage: S,
    customers: CustomerDirectory,
    accounts: AccountTable,
    ledger: TransactionLedger,
}

impl<S: Storage> Bank<S> {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Load every collection from `storage`. Absent collections are empty.
    ///
    /// Repeated customer ids and account numbers keep their first record;
    /// the rest are dropped with a warning.
    ///
    /// # Errors
    /// - malformed or invalid lines (`StorageError::Codec`)
    /// - a transaction id with no successor (`StorageError::Inconsistent`)
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let read = |collection: Collection| -> Result<String, StorageError> {
            Ok(storage.read(collection)?.unwrap_or_default())
        };

        let mut customers = CustomerDirectory::new();
        for customer in codec::decode_customers(&read(Collection::Customers)?)? {
            if let Err(e) = customers.insert(customer) {
                tracing::warn!("Skipping customer record: {}", e);
            }
        }
        customers.dedup_account_lists();

        let mut accounts = AccountTable::new();
        let savings = codec::decode_saving_accounts(&read(Collection::SavingAccounts)?)?;
        let currents = codec::decode_current_accounts(&read(Collection::CurrentAccounts)?)?;
        for account in savings
            .into_iter()
            .map(Account::Saving)
            .chain(currents.into_iter().map(Account::Current))
        {
            let kind = account.kind();
            if let Err(e) = accounts.insert(account) {
                tracing::warn!(%kind, "Skipping {} account record: {}", kind, e);
            }
        }

        for account in accounts.iter() {
            let owner = account.customer_id();
            let number = account.account_number();
            match customers.get(owner).map(|c| c.owns(number)) {
                None => tracing::warn!(
                    "Account {} refers to unknown customer {}",
                    number,
                    owner
                ),
                Some(false) => {
                    tracing::warn!("Re-linking account {} to customer {}", number, owner);
                    customers
                        .add_account(owner, number)
                        .map_err(|e| StorageError::Inconsistent(e.to_string()))?;
                }
                Some(true) => {}
            }
        }

        let entries = codec::decode_transactions(&read(Collection::Transactions)?)?;
        for txn in entries.iter().filter(|t| !accounts.contains(t.account_number())) {
            tracing::warn!(
                "Transaction {} refers to unknown account {}",
                txn.transaction_id(),
                txn.account_number()
            );
        }
        let ledger = TransactionLedger::from_entries(entries)
            .map_err(|e| StorageError::Inconsistent(e.to_string()))?;

        tracing::info!(
            customers = customers.len(),
            accounts = accounts.len(),
            transactions = ledger.len(),
            "Bank state loaded"
        );

        Ok(Self {
            storage,
            customers,
            accounts,
            ledger,
        })
    }

    /// Write every collection.
    pub fn save_all(&mut self) -> Result<(), StorageError> {
        self.persist(&Collection::ALL)
    }

    /// Final save, handing the storage back.
    pub fn close(mut self) -> Result<S, StorageError> {
        self.save_all()?;
        tracing::info!("Bank state saved on shutdown");
        Ok(self.storage)
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Register a customer.
    ///
    /// # Errors
    /// - `DomainError::DuplicateCustomer` if the id is taken
    pub fn create_customer(&mut self, command: CreateCustomerCommand) -> AppResult<Customer> {
        let customer = self
            .customers
            .create(
                &command.customer_id,
                &command.name,
                &command.address,
                &command.contact,
            )
            .map(Customer::clone)
            .map_err(|e| Self::rejected("create_customer", e))?;

        if let Err(e) = self.persist(&[Collection::Customers]) {
            self.customers.remove_last();
            return Err(self.restore_after_failure(&[Collection::Customers], e));
        }

        tracing::info!("Created customer {}", customer.customer_id());
        Ok(customer)
    }

    pub fn customer(&self, customer_id: &str) -> AppResult<&Customer> {
        Ok(self.customers.find(customer_id)?)
    }

    pub fn customers(&self) -> &CustomerDirectory {
        &self.customers
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Open an account for an existing customer.
    ///
    /// Checks run in order: customer exists, number unused, kind valid,
    /// limit and opening balance valid.
    pub fn create_account(&mut self, command: OpenAccountCommand) -> AppResult<Account> {
        let account = self
            .build_account(&command)
            .map_err(|e| Self::rejected("create_account", e))?;
        let collections = [Collection::Customers, kind_collection(account.kind())];

        self.accounts.insert(account.clone())?;
        self.customers
            .add_account(&command.customer_id, &command.account_number)?;

        if let Err(e) = self.persist(&collections) {
            self.accounts.remove_last();
            self.customers.unlink_last_account(&command.customer_id);
            return Err(self.restore_after_failure(&collections, e));
        }

        tracing::info!(
            "Opened {} account {} for customer {}",
            account.kind(),
            account.account_number(),
            account.customer_id()
        );
        Ok(account)
    }

    fn build_account(&self, command: &OpenAccountCommand) -> Result<Account, DomainError> {
        self.customers.find(&command.customer_id)?;
        self.accounts.ensure_available(&command.account_number)?;
        let kind: AccountKind = command.kind.parse()?;

        Account::open(
            kind,
            command.account_number.as_str(),
            command.customer_id.as_str(),
            command.initial_balance,
            command.overdraw_limit,
        )
    }

    pub fn account(&self, account_number: &str) -> AppResult<&Account> {
        Ok(self.accounts.find(account_number)?)
    }

    pub fn accounts(&self) -> &AccountTable {
        &self.accounts
    }

    /// A customer's accounts, in the order they were opened
    pub fn accounts_for(&self, customer_id: &str) -> AppResult<Vec<&Account>> {
        let customer = self.customers.find(customer_id)?;
        Ok(customer
            .accounts()
            .iter()
            .filter_map(|number| self.accounts.get(number))
            .collect())
    }

    pub fn balance(&self, account_number: &str) -> AppResult<Decimal> {
        Ok(self.accounts.find(account_number)?.balance())
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Apply a deposit or withdrawal, record it, and persist.
    ///
    /// Either the balance, the ledger and the files all change, or none of
    /// them do.
    pub fn make_transaction(
        &mut self,
        account_number: &str,
        transaction_type: TransactionType,
        amount: Decimal,
    ) -> AppResult<Transaction> {
        let (previous, updated, amount) = self
            .validate_transaction(account_number, transaction_type, amount)
            .map_err(|e| Self::rejected(transaction_type.as_str(), e))?;
        let collections = [kind_collection(updated.kind()), Collection::Transactions];

        let transaction = self
            .ledger
            .record(account_number, transaction_type, amount)
            .map_err(|e| Self::rejected(transaction_type.as_str(), e))?
            .clone();
        self.replace_account(account_number, updated);

        if let Err(e) = self.persist(&collections) {
            self.replace_account(account_number, previous);
            self.ledger.rollback_last();
            return Err(self.restore_after_failure(&collections, e));
        }

        tracing::info!(
            transaction_id = transaction.transaction_id(),
            account = account_number,
            kind = %transaction_type,
            amount = %amount,
            "Transaction committed"
        );
        Ok(transaction)
    }

    /// Work out the account's next state without touching the table.
    fn validate_transaction(
        &self,
        account_number: &str,
        transaction_type: TransactionType,
        amount: Decimal,
    ) -> Result<(Account, Account, Amount), DomainError> {
        let previous = self.accounts.find(account_number)?.clone();
        let amount = Amount::new(amount)?;

        let mut updated = previous.clone();
        match transaction_type {
            TransactionType::Deposit => updated.deposit(&amount)?,
            TransactionType::Withdraw => updated.withdraw(&amount)?,
        };

        Ok((previous, updated, amount))
    }

    pub fn deposit(&mut self, account_number: &str, amount: Decimal) -> AppResult<Transaction> {
        self.make_transaction(account_number, TransactionType::Deposit, amount)
    }

    pub fn withdraw(&mut self, account_number: &str, amount: Decimal) -> AppResult<Transaction> {
        self.make_transaction(account_number, TransactionType::Withdraw, amount)
    }

    /// History of one account, oldest first
    pub fn transactions_for<'a>(
        &'a self,
        account_number: &'a str,
    ) -> AppResult<impl Iterator<Item = &'a Transaction> + Clone + 'a> {
        self.accounts.find(account_number)?;
        Ok(self.ledger.for_account(account_number))
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn replace_account(&mut self, account_number: &str, account: Account) {
        if let Some(slot) = self.accounts.get_mut(account_number) {
            *slot = account;
        }
    }

    fn encode(&self, collection: Collection) -> Result<String, StorageError> {
        let text = match collection {
            Collection::Customers => codec::encode_customers(self.customers.iter()),
            Collection::SavingAccounts => codec::encode_saving_accounts(self.accounts.savings()),
            Collection::CurrentAccounts => {
                codec::encode_current_accounts(self.accounts.currents())
            }
            Collection::Transactions => codec::encode_transactions(self.ledger.iter()),
        }?;
        Ok(text)
    }

    fn persist(&mut self, collections: &[Collection]) -> Result<(), StorageError> {
        for &collection in collections {
            let text = self.encode(collection)?;
            self.storage.write(collection, &text)?;
            tracing::debug!(%collection, bytes = text.len(), "Collection written");
        }
        Ok(())
    }

    /// After an in-memory rollback, try to put the touched collections back
    /// to match memory again. The original failure is what gets reported.
    fn restore_after_failure(
        &mut self,
        collections: &[Collection],
        error: StorageError,
    ) -> AppError {
        tracing::error!("Persisting failed, changes rolled back: {}", error);
        if let Err(e) = self.persist(collections) {
            tracing::error!("Could not restore persisted state: {}", e);
        }
        AppError::Storage(error)
    }

    fn rejected(operation: &str, error: DomainError) -> AppError {
        let error = AppError::Domain(error);
        tracing::warn!(
            operation,
            code = error.code(),
            "Operation rejected: {}",
            error
        );
        error
    }
}

fn kind_collection(kind: AccountKind) -> Collection {
    match kind {
        AccountKind::Saving => Collection::SavingAccounts,
        AccountKind::Current => Collection::CurrentAccounts,
    }
}
