use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::resolve_account;
use crate::cli::{AccountAction, CategoryAction, Kind, TransactionAction};
use crate::db::Database;
use crate::models::{Account, AccountType, Category, CategoryType, Transaction};
use crate::report::{build_month_totals, percent_of_month, round_whole, MonthKey};
use crate::util::{format_brl, format_signed_brl, truncate};

// ── Accounts ──────────────────────────────────────────────────

pub(super) fn cmd_accounts(db: &Database, action: AccountAction) -> Result<()> {
    match action {
        AccountAction::List => {
            print!("{}", render_accounts(&db.get_accounts()?));
        }
        AccountAction::Add {
            name,
            account_type,
            currency,
            balance,
        } => {
            let mut account = Account::new(name, parse_account_type(&account_type)?);
            account.currency = currency;
            account.initial_balance = balance;
            let id = db.insert_account(&account)?;
            println!("Created account {id}: {}", account.name);
        }
        AccountAction::Edit {
            id,
            name,
            account_type,
            currency,
            balance,
        } => {
            let mut account = db
                .get_account_by_id(id)?
                .ok_or_else(|| anyhow::anyhow!("Account {id} not found"))?;
            if let Some(name) = name {
                account.name = name;
            }
            if let Some(t) = account_type {
                account.account_type = parse_account_type(&t)?;
            }
            if let Some(currency) = currency {
                account.currency = currency;
            }
            if let Some(balance) = balance {
                account.initial_balance = balance;
            }
            db.update_account(&account)?;
            println!("Updated account {id}: {}", account.name);
        }
        AccountAction::Delete { id } => {
            db.delete_account(id)?;
            println!("Deleted account {id}");
        }
    }
    Ok(())
}

fn parse_account_type(s: &str) -> Result<AccountType> {
    AccountType::parse(s).ok_or_else(|| {
        let valid: Vec<&str> = AccountType::all().iter().map(|t| t.as_str()).collect();
        anyhow::anyhow!("Unknown account type '{s}' (expected one of: {})", valid.join(", "))
    })
}

pub(super) fn render_accounts(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts\n".to_string();
    }
    let mut out = format!(
        "{:<4} {:<20} {:<12} {:<4} {:>16}\n",
        "ID", "Name", "Type", "Cur.", "Opening balance"
    );
    out.push_str(&format!("{}\n", "─".repeat(60)));
    for acct in accounts {
        out.push_str(&format!(
            "{:<4} {:<20} {:<12} {:<4} {:>16}\n",
            acct.id.unwrap_or(0),
            truncate(&acct.name, 20),
            acct.account_type.label(),
            acct.currency,
            format_brl(acct.initial_balance),
        ));
    }
    out
}

// ── Categories ────────────────────────────────────────────────

pub(super) fn cmd_categories(db: &Database, action: CategoryAction) -> Result<()> {
    match action {
        CategoryAction::List => {
            print!("{}", render_categories(&db.get_categories()?));
        }
        CategoryAction::Add {
            name,
            category_type,
        } => {
            let cat = Category::new(name, parse_category_type(&category_type)?);
            let id = db.insert_category(&cat)?;
            println!("Created category {id}: {}", cat.name);
        }
        CategoryAction::Edit {
            id,
            name,
            category_type,
        } => {
            let mut cat = db
                .get_category_by_id(id)?
                .ok_or_else(|| anyhow::anyhow!("Category {id} not found"))?;
            if let Some(name) = name {
                cat.name = name;
            }
            if let Some(t) = category_type {
                cat.category_type = parse_category_type(&t)?;
            }
            db.update_category(&cat)?;
            println!("Updated category {id}: {}", cat.name);
        }
        CategoryAction::Delete { id } => {
            let cat = db
                .get_category_by_id(id)?
                .ok_or_else(|| anyhow::anyhow!("Category {id} not found"))?;
            db.delete_category(id)?;
            println!("Deleted category: {}", cat.name);
        }
    }
    Ok(())
}

fn parse_category_type(s: &str) -> Result<CategoryType> {
    CategoryType::parse(s)
        .ok_or_else(|| anyhow::anyhow!("Unknown category type '{s}' (expected income or expense)"))
}

pub(super) fn render_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories\n".to_string();
    }
    let mut out = format!("{:<4} {:<24} Type\n", "ID", "Name");
    out.push_str(&format!("{}\n", "─".repeat(40)));
    for cat in categories {
        out.push_str(&format!(
            "{:<4} {:<24} {}\n",
            cat.id.unwrap_or(0),
            truncate(&cat.name, 24),
            cat.category_type.label(),
        ));
    }
    out
}

// ── Transactions ──────────────────────────────────────────────

pub(super) fn cmd_transactions(
    db: &Database,
    action: TransactionAction,
    today: NaiveDate,
) -> Result<()> {
    match action {
        TransactionAction::List { month, account } => {
            let month = month
                .map(|m| {
                    MonthKey::parse(&m)
                        .ok_or_else(|| anyhow::anyhow!("Invalid month '{m}' (expected YYYY-MM)"))
                })
                .transpose()?;
            let account_id = account
                .map(|name| resolve_account(db, Some(&name)))
                .transpose()?;

            let all = db.get_transactions(None, None)?;
            let shown = db.get_transactions(account_id, month)?;
            let categories = db.get_categories()?;
            print!("{}", render_transactions(&shown, &all, &categories)?);
            println!("{} of {} transactions", shown.len(), db.get_transaction_count()?);
        }
        TransactionAction::Add {
            amount,
            description,
            date,
            kind,
            category,
            account,
        } => {
            let account_id = resolve_account(db, account.as_deref())?;
            let categories = db.get_categories()?;
            let date = date.unwrap_or(today);
            let mut txn = Transaction::new(
                account_id,
                date.format("%Y-%m-%d").to_string(),
                description,
                apply_kind(amount, kind),
            );
            txn.category_id = category
                .as_deref()
                .map(|name| resolve_category(&categories, name))
                .transpose()?
                .flatten();
            let id = db.insert_transaction(&txn)?;
            println!(
                "Recorded transaction {id}: {} {}",
                txn.description,
                format_signed_brl(txn.amount)
            );
        }
        TransactionAction::Edit {
            id,
            amount,
            description,
            date,
            kind,
            category,
        } => {
            let mut txn = db
                .get_transaction_by_id(id)?
                .ok_or_else(|| anyhow::anyhow!("Transaction {id} not found"))?;
            if let Some(amount) = amount {
                txn.amount = amount;
            }
            txn.amount = apply_kind(txn.amount, kind);
            if let Some(description) = description {
                txn.description = description;
            }
            if let Some(date) = date {
                txn.transaction_date = date.format("%Y-%m-%d").to_string();
            }
            if let Some(name) = category {
                let categories = db.get_categories()?;
                txn.category_id = resolve_category(&categories, &name)?;
            }
            db.update_transaction(&txn)?;
            println!("Updated transaction {id}");
        }
        TransactionAction::Delete { id } => {
            db.delete_transaction(id)?;
            println!("Deleted transaction {id}");
        }
    }
    Ok(())
}

/// Force the amount's sign to match `kind`, if given.
pub(super) fn apply_kind(amount: Decimal, kind: Option<Kind>) -> Decimal {
    match kind {
        Some(Kind::Income) => amount.abs(),
        Some(Kind::Expense) => -amount.abs(),
        None => amount,
    }
}

/// Empty name clears the category.
pub(super) fn resolve_category(categories: &[Category], name: &str) -> Result<Option<i64>> {
    if name.trim().is_empty() {
        return Ok(None);
    }
    Category::find_by_name(categories, name)
        .map(|c| c.id)
        .ok_or_else(|| anyhow::anyhow!("Category '{name}' not found"))
}

/// `shown` is listed; `all` feeds the monthly totals for the share column.
pub(super) fn render_transactions(
    shown: &[Transaction],
    all: &[Transaction],
    categories: &[Category],
) -> Result<String> {
    if shown.is_empty() {
        return Ok("No transactions found\n".to_string());
    }
    let buckets = build_month_totals(all)?;

    let mut out = format!(
        "{:<5} {:<10} {:<28} {:<16} {:>16} {:>6}\n",
        "ID", "Date", "Description", "Category", "Amount", "Share"
    );
    out.push_str(&format!("{}\n", "─".repeat(86)));
    for txn in shown {
        let category = txn
            .category_id
            .and_then(|id| Category::find_by_id(categories, id))
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        let share = round_whole(percent_of_month(txn, &buckets)).to_string();
        let date = match txn.transaction_date.as_str() {
            "" => "-",
            d => d,
        };
        out.push_str(&format!(
            "{:<5} {:<10} {:<28} {:<16} {:>16} {:>5}%\n",
            txn.id.unwrap_or(0),
            date,
            truncate(&txn.description, 28),
            truncate(category, 16),
            format_signed_brl(txn.amount),
            share,
        ));
    }
    Ok(out)
}
