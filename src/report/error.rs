use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum ReportError {
    #[error("Axis values must be non-negative, got {0}")]
    NegativeAxisValue(Decimal),
    #[error("Amounts are too large to total")]
    Overflow,
}
