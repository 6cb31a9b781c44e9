//! Coverage ratio helper.

#![allow(missing_docs)]

/// `100 * covered / total`, or `0.0` for an empty total.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent(covered: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * covered as f64 / total as f64
}

/// A percentage with exactly two decimals, no sign.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}
