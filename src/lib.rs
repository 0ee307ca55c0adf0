//! bank_ledger Library
//!
//! Customers, saving and current accounts, and an append-only transaction
//! ledger, persisted as line-delimited JSON collections.

pub mod codec;
pub mod config;
pub mod directory;
pub mod domain;
pub mod ledger;
pub mod model;
pub mod shell;
pub mod store;

mod error;

pub use config::{Config, LogFormat};
pub use error::{AppError, AppResult};
pub use domain::{Amount, AmountError, Balance, DomainError};
pub use ledger::{Transaction, TransactionLedger, TransactionType};
pub use model::{Account, AccountKind, BalanceHolder, Customer};
pub use store::{Bank, FileStorage, MemoryStorage, Storage, StorageError};
