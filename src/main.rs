mod cli;
mod config;
mod db;
mod import;
mod models;
mod report;
mod run;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::Config::resolve(cli.db.clone())?;
    let mut db = db::Database::open(&config.db_path)?;
    ensure_default_account(&db)?;

    let today = chrono::Local::now().date_naive();
    run::execute(cli.command, &mut db, today)
}

/// Priority: RUST_LOG env var > --verbose flag > warnings only.
/// Logs go to stderr so command output stays clean.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn ensure_default_account(db: &db::Database) -> Result<()> {
    if db.get_accounts()?.is_empty() {
        let account = models::Account::new("Carteira".into(), models::AccountType::Cash);
        db.insert_account(&account)?;
        tracing::info!("Created default account");
    }
    Ok(())
}
