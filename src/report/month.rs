use chrono::{Datelike, NaiveDate};

/// Number of calendar months covered by the trailing report window.
pub(crate) const WINDOW_MONTHS: u32 = 6;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// A calendar month. Orders chronologically, which matches the
/// lexicographic order of its `YYYY-MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MonthKey {
    year: i32,
    /// 1-based.
    month: u32,
}

impl MonthKey {
    pub(crate) fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub(crate) fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a `YYYY-MM` string.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        Self::new(year.parse().ok()?, month.parse().ok()?)
    }

    /// The month `n` months before this one, rolling the year as needed.
    pub(crate) fn months_before(&self, n: u32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 - n as i32;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Short Portuguese month name used on chart axes, e.g. "Fev".
    pub(crate) fn label(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The `WINDOW_MONTHS` months ending at `now`'s month, oldest first.
pub(crate) fn trailing_window(now: NaiveDate) -> Vec<MonthKey> {
    let current = MonthKey::of(now);
    (0..WINDOW_MONTHS)
        .rev()
        .map(|i| current.months_before(i))
        .collect()
}

#[cfg(test)]
#[path = "month_tests.rs"]
mod tests;
