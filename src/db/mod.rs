mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;
use crate::report::MonthKey;

pub(crate) struct Database {
    conn: Connection,
}

const ACCOUNT_COLUMNS: &str = "id, name, account_type, currency, initial_balance, created_at";
const TRANSACTION_COLUMNS: &str =
    "id, account_id, transaction_date, description, amount, category_id, created_at";

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_default_categories()?;
        tracing::debug!(path = %path.display(), "Opened database");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_default_categories()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            tracing::debug!(version = schema::CURRENT_VERSION, "Creating schema");
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::debug!(from_version, "Applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn seed_default_categories(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let defaults = [
            ("Alimentação", CategoryType::Expense),
            ("Educação", CategoryType::Expense),
            ("Lazer", CategoryType::Expense),
            ("Moradia", CategoryType::Expense),
            ("Saúde", CategoryType::Expense),
            ("Transporte", CategoryType::Expense),
            ("Freelance", CategoryType::Income),
            ("Investimentos", CategoryType::Income),
            ("Salário", CategoryType::Income),
        ];

        let tx = self.conn.transaction()?;
        for (name, category_type) in &defaults {
            tx.execute(
                "INSERT OR IGNORE INTO categories (name, category_type) VALUES (?1, ?2)",
                params![name, category_type.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Accounts ──────────────────────────────────────────────

    pub(crate) fn insert_account(&self, account: &Account) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO accounts (name, account_type, currency, initial_balance, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account.name,
                account.account_type.as_str(),
                account.currency,
                account.initial_balance.to_string(),
                account.created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name = %account.name, "Inserted account");
        Ok(id)
    }

    pub(crate) fn get_accounts(&self) -> Result<Vec<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY name"))?;
        let rows = stmt.query_map([], row_to_account)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        let result = self.conn.query_row(
            &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?1"),
            params![id],
            row_to_account,
        );
        match result {
            Ok(a) => Ok(Some(a)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn update_account(&self, account: &Account) -> Result<()> {
        let id = account
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update an account without an ID"))?;
        let changed = self.conn.execute(
            "UPDATE accounts SET name = ?1, account_type = ?2, currency = ?3, initial_balance = ?4
             WHERE id = ?5",
            params![
                account.name,
                account.account_type.as_str(),
                account.currency,
                account.initial_balance.to_string(),
                id,
            ],
        )?;
        if changed == 0 {
            anyhow::bail!("Account {id} not found");
        }
        Ok(())
    }

    pub(crate) fn delete_account(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM accounts WHERE id = ?1", params![id])
            .with_context(|| {
                format!("Failed to delete account {id} (does it still have transactions?)")
            })?;
        if changed == 0 {
            anyhow::bail!("Account {id} not found");
        }
        tracing::debug!(id, "Deleted account");
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category_type FROM categories ORDER BY category_type, name",
        )?;
        let rows = stmt.query_map([], row_to_category)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            "SELECT id, name, category_type FROM categories WHERE id = ?1",
            params![id],
            row_to_category,
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn insert_category(&self, cat: &Category) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO categories (name, category_type) VALUES (?1, ?2)",
                params![cat.name, cat.category_type.as_str()],
            )
            .with_context(|| format!("Failed to create category '{}'", cat.name))?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name = %cat.name, "Inserted category");
        Ok(id)
    }

    pub(crate) fn update_category(&self, cat: &Category) -> Result<()> {
        let id = cat
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a category without an ID"))?;
        let changed = self.conn.execute(
            "UPDATE categories SET name = ?1, category_type = ?2 WHERE id = ?3",
            params![cat.name, cat.category_type.as_str(), id],
        )?;
        if changed == 0 {
            anyhow::bail!("Category {id} not found");
        }
        Ok(())
    }

    /// Transactions in the category keep existing with no category.
    pub(crate) fn delete_category(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        if changed == 0 {
            anyhow::bail!("Category {id} not found");
        }
        tracing::debug!(id, "Deleted category");
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions (account_id, transaction_date, description, amount, category_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                txn.account_id,
                txn.transaction_date,
                txn.description,
                txn.amount.to_string(),
                txn.category_id,
                txn.created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, amount = %txn.amount, "Inserted transaction");
        Ok(id)
    }

    pub(crate) fn insert_transactions_batch(&mut self, txns: &[Transaction]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for txn in txns {
            tx.execute(
                "INSERT INTO transactions (account_id, transaction_date, description, amount, category_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    txn.account_id,
                    txn.transaction_date,
                    txn.description,
                    txn.amount.to_string(),
                    txn.category_id,
                    txn.created_at,
                ],
            )?;
        }
        tx.commit()?;
        Ok(txns.len())
    }

    /// Transactions newest first, optionally narrowed to one account and/or month.
    pub(crate) fn get_transactions(
        &self,
        account_id: Option<i64>,
        month: Option<MonthKey>,
    ) -> Result<Vec<Transaction>> {
        let mut sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions t WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(aid) = account_id {
            sql.push_str(&format!(" AND t.account_id = ?{}", param_values.len() + 1));
            param_values.push(Box::new(aid));
        }
        if let Some(m) = month {
            sql.push_str(&format!(
                " AND t.transaction_date LIKE ?{}",
                param_values.len() + 1
            ));
            param_values.push(Box::new(format!("{m}%")));
        }

        sql.push_str(" ORDER BY t.transaction_date DESC, t.id DESC");

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), row_to_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let result = self.conn.query_row(
            &format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1"),
            params![id],
            row_to_transaction,
        );
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    pub(crate) fn update_transaction(&self, txn: &Transaction) -> Result<()> {
        let id = txn
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a transaction without an ID"))?;
        let changed = self.conn.execute(
            "UPDATE transactions
             SET account_id = ?1, transaction_date = ?2, description = ?3, amount = ?4, category_id = ?5
             WHERE id = ?6",
            params![
                txn.account_id,
                txn.transaction_date,
                txn.description,
                txn.amount.to_string(),
                txn.category_id,
                id,
            ],
        )?;
        if changed == 0 {
            anyhow::bail!("Transaction {id} not found");
        }
        Ok(())
    }

    pub(crate) fn delete_transaction(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if changed == 0 {
            anyhow::bail!("Transaction {id} not found");
        }
        tracing::debug!(id, "Deleted transaction");
        Ok(())
    }
}

fn row_to_account(row: &Row<'_>) -> rusqlite::Result<Account> {
    let type_str: String = row.get(2)?;
    Ok(Account {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        account_type: AccountType::parse(&type_str).ok_or_else(|| invalid_text(2, &type_str))?,
        currency: row.get(3)?,
        initial_balance: parse_decimal_column(row, 4)?,
        created_at: row.get(5)?,
    })
}

fn row_to_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    let type_str: String = row.get(2)?;
    Ok(Category {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        category_type: CategoryType::parse(&type_str).ok_or_else(|| invalid_text(2, &type_str))?,
    })
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: Some(row.get(0)?),
        account_id: row.get(1)?,
        transaction_date: row.get(2)?,
        description: row.get(3)?,
        amount: parse_decimal_column(row, 4)?,
        category_id: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Amounts are stored as TEXT to keep exact decimal values.
fn parse_decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn invalid_text(idx: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        format!("unexpected value '{value}'").into(),
    )
}

#[cfg(test)]
mod tests;
