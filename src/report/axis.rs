use rust_decimal::{Decimal, RoundingStrategy};

use super::buckets::round_whole;
use super::error::ReportError;

const CURRENCY_MARKER: &str = "R$";

/// Compact currency label for chart axes and legends.
/// e.g. `999` → `"R$ 999"`, `1500` → `"R$ 1.5k"`, `2500000` → `"R$ 2.5M"`
///
/// Only meant for non-negative aggregate magnitudes; money amounts shown to the
/// user go through `util::format_brl` instead.
pub(crate) fn format_currency_for_axis(value: Decimal) -> Result<String, ReportError> {
    if value < Decimal::ZERO {
        return Err(ReportError::NegativeAxisValue(value));
    }

    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);

    let compact = if value >= million {
        format!("{:.1}M", one_place(value / million))
    } else if value >= thousand {
        format!("{:.1}k", one_place(value / thousand))
    } else {
        format!("{:.0}", round_whole(value))
    };
    Ok(format!("{CURRENCY_MARKER} {compact}"))
}

fn one_place(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
#[path = "axis_tests.rs"]
mod tests;
