use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Category, Transaction};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Column positions within a CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    date: usize,
    description: usize,
    amount: usize,
    category: Option<usize>,
}

impl Columns {
    /// Match header names, falling back to `date, description, amount[, category]`.
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
        };
        Self {
            date: find(&["date", "data", "transaction_date"]).unwrap_or(0),
            description: find(&["description", "descrição", "descricao", "memo"]).unwrap_or(1),
            amount: find(&["amount", "valor", "value"]).unwrap_or(2),
            category: find(&["category", "categoria"])
                .or_else(|| (headers.len() > 3).then_some(3)),
        }
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read a CSV with a header row into transactions for `account_id`.
    ///
    /// Category names are resolved against `categories`; unknown names leave
    /// the transaction uncategorized.
    pub(crate) fn load(
        path: &Path,
        account_id: i64,
        categories: &[Category],
    ) -> Result<Vec<Transaction>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let headers = rdr.headers().context("Failed to read CSV header")?.clone();
        let columns = Columns::from_headers(&headers);
        tracing::debug!(?columns, "Resolved CSV columns");

        let mut transactions = Vec::new();
        let now = chrono::Utc::now().to_rfc3339();

        for (i, result) in rdr.records().enumerate() {
            // Header is line 1.
            let line = i + 2;
            let record = result.with_context(|| format!("Line {line}: failed to read record"))?;
            let field = |idx: usize| record.get(idx).unwrap_or("").trim();

            let date_str = field(columns.date);
            if date_str.is_empty() {
                tracing::warn!(line, "Skipping row without a date");
                continue;
            }
            let date = parse_date(date_str)
                .with_context(|| format!("Line {line}: failed to parse date '{date_str}'"))?;

            let amount = parse_amount(field(columns.amount))
                .with_context(|| format!("Line {line}: failed to parse amount"))?;

            let category_id = columns
                .category
                .map(field)
                .filter(|name| !name.is_empty())
                .and_then(|name| {
                    let found = Category::find_by_name(categories, name).and_then(|c| c.id);
                    if found.is_none() {
                        tracing::warn!(line, category = name, "Unknown category, leaving empty");
                    }
                    found
                });

            transactions.push(Transaction {
                id: None,
                account_id,
                transaction_date: date.format("%Y-%m-%d").to_string(),
                description: field(columns.description).to_string(),
                amount,
                category_id,
                created_at: now.clone(),
            });
        }

        Ok(transactions)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| anyhow::anyhow!("Could not parse date: {s}"))
}

/// Parse amounts like `-1.234,56`, `R$ 1,234.56` or `(500.00)`.
fn parse_amount(s: &str) -> Result<Decimal> {
    let mut cleaned: String = s
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$' && *c != '"')
        .collect();
    if cleaned.starts_with('(') && cleaned.ends_with(')') {
        cleaned = format!("-{}", &cleaned[1..cleaned.len() - 1]);
    }
    if cleaned.is_empty() {
        anyhow::bail!("Amount is empty");
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // Whichever separator comes last is the decimal point.
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(comma), None) => {
            let decimals = cleaned.len() - comma - 1;
            if cleaned.matches(',').count() == 1 && decimals <= 2 {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        (None, Some(_)) if cleaned.matches('.').count() > 1 => cleaned.replace('.', ""),
        _ => cleaned,
    };

    Decimal::from_str(&normalized).with_context(|| format!("Failed to parse '{s}' as decimal"))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
