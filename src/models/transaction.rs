use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Direction of money for a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Income,
    Expense,
    /// Zero-amount entries count toward neither side.
    Neutral,
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Option<i64>,
    pub account_id: i64,
    /// Format: "YYYY-MM-DD". May be empty for legacy rows.
    pub transaction_date: String,
    pub description: String,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub created_at: String,
}

impl Transaction {
    pub fn new(
        account_id: i64,
        transaction_date: String,
        description: String,
        amount: Decimal,
    ) -> Self {
        Self {
            id: None,
            account_id,
            transaction_date,
            description,
            amount,
            category_id: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn flow(&self) -> Flow {
        if self.amount > Decimal::ZERO {
            Flow::Income
        } else if self.amount < Decimal::ZERO {
            Flow::Expense
        } else {
            Flow::Neutral
        }
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    /// The parsed transaction date, or `None` when it is missing or malformed.
    ///
    /// Accepts a bare date or a full timestamp whose first ten characters are
    /// the date (as stored by hosted backends).
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.transaction_date.trim();
        let day = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}
