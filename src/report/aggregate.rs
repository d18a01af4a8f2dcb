use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use super::axis::format_currency_for_axis;
use super::buckets::{checked_sum, MonthlyBuckets};
use super::error::ReportError;
use crate::models::{Category, Flow, Transaction};

/// Label used when an expense has no category, or its category is gone.
pub(crate) const UNCATEGORIZED_LABEL: &str = "Outros";

/// Maximum number of slices in the category breakdown.
pub(crate) const TOP_CATEGORIES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct TotalsPair {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CategorySlice {
    pub(crate) name: String,
    /// e.g. "Mercado (R$ 1.2k)"
    pub(crate) label: String,
    pub(crate) value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Aggregate {
    pub(crate) totals: TotalsPair,
    /// Sorted by value, largest first. At most `TOP_CATEGORIES` entries.
    pub(crate) expenses_by_category: Vec<CategorySlice>,
}

/// All-time income/expense totals and the top expense categories.
///
/// Undated transactions are skipped, matching `build_monthly_buckets`.
pub(crate) fn aggregate_all(
    transactions: &[Transaction],
    categories: &[Category],
) -> Result<Aggregate, ReportError> {
    let names: HashMap<i64, &str> = categories
        .iter()
        .filter_map(|c| c.id.map(|id| (id, c.name.as_str())))
        .collect();

    let mut totals = TotalsPair::default();
    let mut by_category: HashMap<&str, Decimal> = HashMap::new();

    for txn in transactions.iter().filter(|t| t.date().is_some()) {
        match txn.flow() {
            Flow::Income => totals.income = checked_sum(totals.income, txn.amount)?,
            Flow::Expense => {
                let amount = txn.abs_amount();
                totals.expense = checked_sum(totals.expense, amount)?;
                let name = txn
                    .category_id
                    .and_then(|id| names.get(&id).copied())
                    .unwrap_or(UNCATEGORIZED_LABEL);
                let slot = by_category.entry(name).or_default();
                *slot = checked_sum(*slot, amount)?;
            }
            Flow::Neutral => {}
        }
    }

    let mut ranked: Vec<(&str, Decimal)> = by_category.into_iter().collect();
    // Name breaks ties so output doesn't depend on hash order.
    ranked.sort_by(|(name_a, a), (name_b, b)| b.cmp(a).then_with(|| name_a.cmp(name_b)));

    let expenses_by_category = ranked
        .into_iter()
        .take(TOP_CATEGORIES)
        .map(|(name, value)| -> Result<CategorySlice, ReportError> {
            Ok(CategorySlice {
                name: name.to_string(),
                label: format!("{name} ({})", format_currency_for_axis(value)?),
                value,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Aggregate {
        totals,
        expenses_by_category,
    })
}

/// Running totals of income and expense across the window, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CumulativeSeries {
    pub(crate) income: Vec<Decimal>,
    pub(crate) expense: Vec<Decimal>,
}

pub(crate) fn cumulative_series(
    buckets: &MonthlyBuckets,
) -> Result<CumulativeSeries, ReportError> {
    let mut series = CumulativeSeries::default();
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for (_, bucket) in buckets.iter() {
        income = checked_sum(income, bucket.income)?;
        expense = checked_sum(expense, bucket.expense)?;
        series.income.push(income);
        series.expense.push(expense);
    }
    Ok(series)
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
