//! Bank Store module
//!
//! The bank itself, its account table, the commands it accepts and the
//! storage backends it persists through.

mod accounts;
mod bank;
mod commands;
mod error;
mod storage;

pub use accounts::AccountTable;
pub use bank::Bank;
pub use commands::{CreateCustomerCommand, OpenAccountCommand};
pub use error::StorageError;
pub use storage::{FileStorage, MemoryStorage, Storage};
