mod import;
mod ledger;
mod report;

use anyhow::Result;
use chrono::NaiveDate;

use crate::cli::{AccountAction, CategoryAction, Commands, TransactionAction};
use crate::db::Database;

/// Run one CLI command. `today` anchors defaults such as the report window.
pub(crate) fn execute(command: Commands, db: &mut Database, today: NaiveDate) -> Result<()> {
    match command {
        Commands::Report { as_of, json } => report::cmd_report(db, as_of.unwrap_or(today), json),
        Commands::Accounts { action } => {
            ledger::cmd_accounts(db, action.unwrap_or(AccountAction::List))
        }
        Commands::Categories { action } => {
            ledger::cmd_categories(db, action.unwrap_or(CategoryAction::List))
        }
        Commands::Transactions { action } => {
            let action = action.unwrap_or(TransactionAction::List {
                month: None,
                account: None,
            });
            ledger::cmd_transactions(db, action, today)
        }
        Commands::Import { file, account } => import::cmd_import(db, &file, account.as_deref()),
    }
}

/// Find an account by name, or use the only account when no name is given.
fn resolve_account(db: &Database, name: Option<&str>) -> Result<i64> {
    let accounts = db.get_accounts()?;
    if let Some(name) = name {
        return accounts
            .iter()
            .find(|a| a.name.to_lowercase() == name.to_lowercase())
            .and_then(|a| a.id)
            .ok_or_else(|| anyhow::anyhow!("Account '{name}' not found"));
    }

    match accounts.as_slice() {
        [] => anyhow::bail!("No accounts found. Create one first with `finchart accounts add`"),
        [only] => only.id.ok_or_else(|| anyhow::anyhow!("Account has no ID")),
        _ => {
            let names: Vec<String> = accounts
                .iter()
                .map(|a| format!("  --account \"{}\"  ({})", a.name, a.account_type))
                .collect();
            anyhow::bail!(
                "Multiple accounts found. Use --account <name> to specify:\n{}",
                names.join("\n")
            );
        }
    }
}
