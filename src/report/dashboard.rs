use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::{aggregate_all, cumulative_series, CategorySlice, TotalsPair};
use super::buckets::{build_monthly_buckets, round_whole};
use super::error::ReportError;
use crate::models::{Category, Transaction};

/// One line of a chart: a value per month of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct MonthlySeries {
    pub(crate) labels: Vec<String>,
    pub(crate) values: Vec<Decimal>,
}

/// Everything the financial dashboard charts need, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DashboardData {
    /// `YYYY-MM` keys of the window, oldest first.
    pub(crate) months: Vec<String>,
    pub(crate) monthly_income: MonthlySeries,
    pub(crate) monthly_expenses: MonthlySeries,
    pub(crate) monthly_net: MonthlySeries,
    pub(crate) cumulative_income: MonthlySeries,
    pub(crate) cumulative_expenses: MonthlySeries,
    /// Whole percentages, rounded half away from zero.
    pub(crate) savings_rate: MonthlySeries,
    pub(crate) expenses_by_category: Vec<CategorySlice>,
    pub(crate) totals: TotalsPair,
}

/// Build all dashboard series from a snapshot of the user's data.
pub(crate) fn build_dashboard(
    transactions: &[Transaction],
    categories: &[Category],
    now: NaiveDate,
) -> Result<DashboardData, ReportError> {
    let buckets = build_monthly_buckets(transactions, now)?;
    let labels: Vec<String> = buckets.keys().map(|k| k.label().to_string()).collect();
    let series = |values: Vec<Decimal>| MonthlySeries {
        labels: labels.clone(),
        values,
    };

    let cumulative = cumulative_series(&buckets)?;
    let aggregate = aggregate_all(transactions, categories)?;

    let dashboard = DashboardData {
        months: buckets.keys().map(|k| k.to_string()).collect(),
        monthly_income: series(buckets.iter().map(|(_, b)| b.income).collect()),
        monthly_expenses: series(buckets.iter().map(|(_, b)| b.expense).collect()),
        monthly_net: series(buckets.iter().map(|(_, b)| b.net).collect()),
        cumulative_income: series(cumulative.income),
        cumulative_expenses: series(cumulative.expense),
        savings_rate: series(
            buckets
                .iter()
                .map(|(_, b)| round_whole(b.savings_rate()))
                .collect(),
        ),
        expenses_by_category: aggregate.expenses_by_category,
        totals: aggregate.totals,
    };

    tracing::debug!(
        transactions = transactions.len(),
        first_month = dashboard.months.first().map(String::as_str),
        categories = dashboard.expenses_by_category.len(),
        "Built dashboard"
    );

    Ok(dashboard)
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
