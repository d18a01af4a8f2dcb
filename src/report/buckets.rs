use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use super::error::ReportError;
use super::month::{trailing_window, MonthKey};
use crate::models::{Flow, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MonthBucket {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    pub(crate) net: Decimal,
}

impl MonthBucket {
    fn add(&mut self, txn: &Transaction) -> Result<(), ReportError> {
        match txn.flow() {
            Flow::Income => self.income = checked_sum(self.income, txn.amount)?,
            Flow::Expense => self.expense = checked_sum(self.expense, txn.abs_amount())?,
            Flow::Neutral => return Ok(()),
        }
        // Both sides are non-negative, so this cannot overflow.
        self.net = self.income - self.expense;
        Ok(())
    }

    /// `(income - expense) / income * 100`, or zero without income.
    pub(crate) fn savings_rate(&self) -> Decimal {
        if self.income > Decimal::ZERO {
            (self.income - self.expense) / self.income * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}

/// Per-month totals, iterated oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyBuckets {
    buckets: BTreeMap<MonthKey, MonthBucket>,
}

impl MonthlyBuckets {
    pub(crate) fn get(&self, key: &MonthKey) -> Option<&MonthBucket> {
        self.buckets.get(key)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&MonthKey, &MonthBucket)> {
        self.buckets.iter()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &MonthKey> {
        self.buckets.keys()
    }
}

/// Group transactions into the zero-filled trailing window ending at `now`.
///
/// Undated transactions and those outside the window are ignored here.
pub(crate) fn build_monthly_buckets(
    transactions: &[Transaction],
    now: NaiveDate,
) -> Result<MonthlyBuckets, ReportError> {
    let mut buckets: BTreeMap<MonthKey, MonthBucket> = trailing_window(now)
        .into_iter()
        .map(|key| (key, MonthBucket::default()))
        .collect();

    for txn in transactions {
        let Some(date) = txn.date() else {
            continue;
        };
        if let Some(bucket) = buckets.get_mut(&MonthKey::of(date)) {
            bucket.add(txn)?;
        }
    }

    Ok(MonthlyBuckets { buckets })
}

/// Group every dated transaction by its month, with no window.
///
/// Only months that have transactions get a bucket.
pub(crate) fn build_month_totals(
    transactions: &[Transaction],
) -> Result<MonthlyBuckets, ReportError> {
    let mut buckets: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
    for txn in transactions {
        if let Some(date) = txn.date() {
            buckets.entry(MonthKey::of(date)).or_default().add(txn)?;
        }
    }
    Ok(MonthlyBuckets { buckets })
}

/// Share of the transaction's month (same direction only), in percent.
///
/// Returns zero when `buckets` has no entry for the month, the date is missing,
/// the amount is zero, or the month total for that direction is zero.
pub(crate) fn percent_of_month(txn: &Transaction, buckets: &MonthlyBuckets) -> Decimal {
    let Some(bucket) = txn.date().and_then(|d| buckets.get(&MonthKey::of(d))) else {
        return Decimal::ZERO;
    };
    let total = match txn.flow() {
        Flow::Income => bucket.income,
        Flow::Expense => bucket.expense,
        Flow::Neutral => return Decimal::ZERO,
    };
    if total > Decimal::ZERO {
        txn.abs_amount() / total * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

pub(super) fn checked_sum(a: Decimal, b: Decimal) -> Result<Decimal, ReportError> {
    a.checked_add(b).ok_or(ReportError::Overflow)
}

/// Round to a whole number, half away from zero.
pub(crate) fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
#[path = "buckets_tests.rs"]
mod tests;
