use anyhow::Result;
use std::path::Path;

use super::resolve_account;
use crate::db::Database;
use crate::import::CsvImporter;

pub(super) fn cmd_import(db: &mut Database, file: &Path, account: Option<&str>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let account_id = resolve_account(db, account)?;
    let categories = db.get_categories()?;
    let txns = CsvImporter::load(file, account_id, &categories)?;

    let categorized = txns.iter().filter(|t| t.category_id.is_some()).count();
    let count = db.insert_transactions_batch(&txns)?;
    tracing::info!(count, categorized, file = %file.display(), "Imported transactions");
    println!("Imported {count} transactions ({categorized} with a category)");
    Ok(())
}
