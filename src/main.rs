//! bank_ledger - interactive banking menu
//!
//! Loads the collections from `BANK_DATA_DIR`, runs the menu on
//! stdin/stdout and saves everything on exit.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bank_ledger::shell::Shell;
use bank_ledger::{Bank, Config, FileStorage, LogFormat};

/// Initialize tracing/logging
///
/// Logs go to stderr so they never interleave with the menu on stdout.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bank_ledger=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!(
        data_dir = %config.data_dir.display(),
        environment = %config.environment,
        production = config.is_production(),
        "Starting bank_ledger"
    );

    let storage = FileStorage::new(config.data_dir.clone())?;
    let bank = Bank::open(storage)?;

    tracing::info!(
        customers = bank.customers().len(),
        accounts = bank.accounts().len(),
        transactions = bank.ledger().len(),
        "Bank loaded"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(stdin.lock(), stdout.lock()).run(bank)?;

    tracing::info!("All data saved. Goodbye!");
    Ok(())
}
