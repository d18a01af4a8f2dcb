use rust_decimal::Decimal;

/// Format a decimal amount as Brazilian reais with 2 decimal places.
/// e.g. `1234567.89` → `"R$ 1.234.567,89"`
pub(crate) fn format_brl(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_dots: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(".");

    if val < Decimal::ZERO {
        format!("-R$ {with_dots},{dec_part}")
    } else {
        format!("R$ {with_dots},{dec_part}")
    }
}

/// Signed amount as shown in transaction lists: `+ R$ 10,00` / `- R$ 4,50`.
pub(crate) fn format_signed_brl(val: Decimal) -> String {
    let sign = if val > Decimal::ZERO {
        '+'
    } else if val < Decimal::ZERO {
        '-'
    } else {
        ' '
    };
    format!("{sign} {}", format_brl(val.abs()))
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

#[cfg(test)]
#[path = "util_tests.rs"]
mod tests;
