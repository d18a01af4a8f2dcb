//! Monthly financial reporting: window buckets, category breakdown and
//! chart-ready series. Everything here is a pure function of its inputs.

mod aggregate;
mod axis;
mod buckets;
mod dashboard;
mod error;
mod month;

pub(crate) use buckets::{build_month_totals, percent_of_month, round_whole};
pub(crate) use dashboard::{build_dashboard, DashboardData};
pub(crate) use month::MonthKey;
