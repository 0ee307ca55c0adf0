//! Interactive menu
//!
//! A line-oriented prompt loop over any reader/writer pair. Every operation
//! error is printed and the menu carries on; choosing exit (or running out
//! of input) performs the final save.

use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::model::{AccountKind, BalanceHolder};
use crate::store::{Bank, CreateCustomerCommand, OpenAccountCommand, Storage};

const MENU: &str = "\n1. Create Customer\n2. Create Account\n3. Deposit\n4. Withdraw\n5. Check Balance\n6. View Transactions\n7. Exit";

pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until exit or end of input, then close the bank.
    pub fn run<S: Storage>(&mut self, mut bank: Bank<S>) -> AppResult<S> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.read_line("Choose: ")? else {
                break;
            };

            let outcome = match choice.trim() {
                "1" => self.create_customer(&mut bank),
                "2" => self.create_account(&mut bank),
                "3" => self.deposit(&mut bank),
                "4" => self.withdraw(&mut bank),
                "5" => self.check_balance(&bank),
                "6" => self.view_transactions(&bank),
                "7" => break,
                _ => Ok("Invalid choice.".to_string()),
            };

            match outcome {
                Ok(message) => writeln!(self.output, "{message}")?,
                Err(AppError::Io(e)) => return Err(AppError::Io(e)),
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        }

        let storage = bank.close()?;
        writeln!(self.output, "Bye!")?;
        Ok(storage)
    }

    fn create_customer<S: Storage>(&mut self, bank: &mut Bank<S>) -> AppResult<String> {
        let customer_id = self.ask("Customer ID: ")?;
        let name = self.ask("Name: ")?;
        let address = self.ask("Address: ")?;
        let contact = self.ask("Contact: ")?;

        let customer = bank.create_customer(
            CreateCustomerCommand::new(customer_id, name)
                .with_address(address)
                .with_contact(contact),
        )?;
        Ok(format!("Customer {} created.", customer.customer_id()))
    }

    fn create_account<S: Storage>(&mut self, bank: &mut Bank<S>) -> AppResult<String> {
        let customer_id = self.ask("Customer ID: ")?;
        bank.customer(&customer_id)?;

        let account_number = self.ask("Account Number: ")?;
        let kind = self.ask("Type (saving/current): ")?;
        let initial_balance = self.ask_decimal("Initial Balance: ")?;

        let mut command = OpenAccountCommand::new(customer_id, account_number, kind, initial_balance);
        if let Ok(AccountKind::Current) = AccountKind::from_str(&command.kind) {
            command = command.with_overdraw_limit(self.ask_decimal("Overdraw Limit: ")?);
        }

        let account = bank.create_account(command)?;
        Ok(format!(
            "{} account {} created. Balance: {}",
            account.kind(),
            account.account_number(),
            account.balance()
        ))
    }

    fn deposit<S: Storage>(&mut self, bank: &mut Bank<S>) -> AppResult<String> {
        let account_number = self.ask("Account Number: ")?;
        bank.account(&account_number)?;
        let amount = self.ask_decimal("Amount: ")?;

        let txn = bank.deposit(&account_number, amount)?;
        Ok(format!(
            "Deposited {} ({}). Balance: {}",
            txn.amount(),
            txn.transaction_id(),
            bank.balance(&account_number)?
        ))
    }

    fn withdraw<S: Storage>(&mut self, bank: &mut Bank<S>) -> AppResult<String> {
        let account_number = self.ask("Account Number: ")?;
        bank.account(&account_number)?;
        let amount = self.ask_decimal("Amount: ")?;

        let txn = bank.withdraw(&account_number, amount)?;
        Ok(format!(
            "Withdrawn {} ({}). Balance: {}",
            txn.amount(),
            txn.transaction_id(),
            bank.balance(&account_number)?
        ))
    }

    fn check_balance<S: Storage>(&mut self, bank: &Bank<S>) -> AppResult<String> {
        let account_number = self.ask("Account Number: ")?;
        let account = bank.account(&account_number)?;

        Ok(match account.overdraw_limit() {
            Some(limit) => format!(
                "Balance: {} (overdraw limit {}, available {})",
                account.balance(),
                limit,
                account.available()
            ),
            None => format!("Balance: {}", account.balance()),
        })
    }

    fn view_transactions<S: Storage>(&mut self, bank: &Bank<S>) -> AppResult<String> {
        let account_number = self.ask("Account Number: ")?;
        let history = bank.transactions_for(&account_number)?;

        let lines: Vec<String> = history.map(ToString::to_string).collect();
        if lines.is_empty() {
            return Ok("No transactions.".to_string());
        }
        Ok(lines.join("\n"))
    }

    // =========================================================================
    // Input helpers
    // =========================================================================

    /// Prompt and read one line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> AppResult<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask(&mut self, prompt: &str) -> AppResult<String> {
        self.read_line(prompt)?
            .ok_or_else(|| AppError::InvalidInput("input ended".to_string()))
    }

    fn ask_decimal(&mut self, prompt: &str) -> AppResult<Decimal> {
        let raw = self.ask(prompt)?;
        Decimal::from_str(raw.trim())
            .map_err(|_| AppError::InvalidInput(format!("not a number: {}", raw.trim())))
    }
}
