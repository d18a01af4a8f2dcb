use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::db::Database;
use crate::report::{build_dashboard, DashboardData};
use crate::util::format_brl;

pub(super) fn cmd_report(db: &Database, now: NaiveDate, json: bool) -> Result<()> {
    let transactions = db.get_transactions(None, None)?;
    let categories = db.get_categories()?;
    let dashboard = build_dashboard(&transactions, &categories, now)?;

    if json {
        let out =
            serde_json::to_string_pretty(&dashboard).context("Failed to serialize dashboard")?;
        println!("{out}");
    } else {
        print!("{}", render_dashboard(&dashboard));
    }
    Ok(())
}

pub(super) fn render_dashboard(dash: &DashboardData) -> String {
    let mut out = String::new();
    let first = dash.months.first().map(String::as_str).unwrap_or("");
    let last = dash.months.last().map(String::as_str).unwrap_or("");

    out.push_str(&format!("finchart - {first} to {last}\n"));
    out.push_str(&format!("{}\n", "─".repeat(86)));
    out.push_str(&format!(
        "{:<9} {:>15} {:>15} {:>8} {:>18} {:>18}\n",
        "Month", "Income", "Expenses", "Savings", "Cum. income", "Cum. expenses"
    ));

    for i in 0..dash.months.len() {
        let label = dash.monthly_income.labels.get(i).map(String::as_str).unwrap_or("");
        let year = dash.months[i].get(..4).unwrap_or("");
        let value = |values: &[rust_decimal::Decimal]| {
            values.get(i).copied().map(format_brl).unwrap_or_default()
        };
        let savings = dash
            .savings_rate
            .values
            .get(i)
            .map(|v| format!("{v}%"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:<9} {:>15} {:>15} {:>8} {:>18} {:>18}\n",
            format!("{label} {year}"),
            value(&dash.monthly_income.values),
            value(&dash.monthly_expenses.values),
            savings,
            value(&dash.cumulative_income.values),
            value(&dash.cumulative_expenses.values),
        ));
    }

    out.push('\n');
    if dash.expenses_by_category.is_empty() {
        out.push_str("No expenses recorded\n");
    } else {
        out.push_str("Top expense categories:\n");
        for slice in &dash.expenses_by_category {
            out.push_str(&format!("  {:<32} {:>15}\n", slice.label, format_brl(slice.value)));
        }
    }

    out.push('\n');
    out.push_str(&format!("  Total income:   {}\n", format_brl(dash.totals.income)));
    out.push_str(&format!("  Total expenses: {}\n", format_brl(dash.totals.expense)));
    out
}
