//! CLI argument definitions using clap.
//!
//! Command implementations live in the `run` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

/// finchart - personal finance tracking with monthly charts
#[derive(Parser, Debug)]
#[command(name = "finchart")]
#[command(about = "Local personal finance tracker with monthly chart reports", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, env = "FINCHART_DB", global = true)]
    pub(crate) db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Print the financial dashboard for the last six months
    Report {
        /// Anchor the window at this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage accounts
    #[command(alias = "account")]
    Accounts {
        #[command(subcommand)]
        action: Option<AccountAction>,
    },

    /// Manage categories
    #[command(alias = "category")]
    Categories {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },

    /// Manage transactions
    #[command(alias = "txn")]
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionAction>,
    },

    /// Import transactions from a CSV file (date, description, amount[, category])
    Import {
        /// CSV file to import
        file: PathBuf,

        /// Account name (defaults to the only account)
        #[arg(short, long)]
        account: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum AccountAction {
    /// List accounts
    List,

    /// Create an account
    Add {
        name: String,

        /// checking, savings, credit_card, investment or cash
        #[arg(long = "type", default_value = "checking")]
        account_type: String,

        #[arg(long, default_value = "BRL")]
        currency: String,

        /// Opening balance
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        balance: Decimal,
    },

    /// Change an account's details
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type")]
        account_type: Option<String>,

        #[arg(long)]
        currency: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        balance: Option<Decimal>,
    },

    /// Delete an account with no transactions
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub(crate) enum CategoryAction {
    /// List categories
    List,

    /// Create a category
    Add {
        name: String,

        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        category_type: String,
    },

    /// Rename a category or change its type
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type")]
        category_type: Option<String>,
    },

    /// Delete a category; its transactions become uncategorized
    Delete { id: i64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Kind {
    Income,
    Expense,
}

#[derive(Subcommand, Debug)]
pub(crate) enum TransactionAction {
    /// List transactions, newest first
    List {
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Only this account
        #[arg(long)]
        account: Option<String>,
    },

    /// Record a transaction
    Add {
        /// Signed amount: positive for income, negative for expense
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,

        #[arg(short, long)]
        description: String,

        /// Transaction date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Force the sign of the amount
        #[arg(long, value_enum)]
        kind: Option<Kind>,

        /// Category name
        #[arg(short, long)]
        category: Option<String>,

        /// Account name (defaults to the only account)
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Change a transaction
    Edit {
        id: i64,

        #[arg(long, allow_negative_numbers = true)]
        amount: Option<Decimal>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long, value_enum)]
        kind: Option<Kind>,

        /// Category name; pass an empty string to clear it
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a transaction
    Delete { id: i64 },
}
