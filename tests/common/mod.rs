//! Common test utilities

#![allow(dead_code)]

use bank_ledger::store::{CreateCustomerCommand, OpenAccountCommand};
use bank_ledger::{Bank, FileStorage};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Fresh data directory and a bank opened on it
pub fn setup_bank() -> (TempDir, Bank<FileStorage>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let bank = open_bank(&dir);
    (dir, bank)
}

/// Open (or reopen) the bank stored in `dir`
pub fn open_bank(dir: &TempDir) -> Bank<FileStorage> {
    let storage = FileStorage::new(dir.path()).expect("Failed to create storage");
    Bank::open(storage).expect("Failed to open bank")
}

/// Customer `C1` with a saving account `A1` and a current account `A2`
/// (limit 100), both opened with `opening` balance.
pub fn seed_customer(bank: &mut Bank<FileStorage>, opening: Decimal) {
    bank.create_customer(
        CreateCustomerCommand::new("C1", "Ada")
            .with_address("1 Main St")
            .with_contact("555-0100"),
    )
    .expect("Failed to create customer");

    bank.create_account(OpenAccountCommand::new("C1", "A1", "saving", opening))
        .expect("Failed to open saving account");
    bank.create_account(
        OpenAccountCommand::new("C1", "A2", "current", opening)
            .with_overdraw_limit(Decimal::new(100, 0)),
    )
    .expect("Failed to open current account");
}
