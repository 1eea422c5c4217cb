//! Client-side aggregates shown on dashboards and reports.

use crate::domain::types::Money;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage change from `previous` to `current`, rounded to one decimal.
///
/// Undefined (`None`) when growing from zero; two zero periods are a 0% change.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return (current == 0.0).then_some(0.0);
    }
    Some(round1((current - previous) / previous.abs() * 100.0))
}

/// `part` as a percentage of `whole`, `None` for an empty whole.
pub fn ratio_percent(part: u64, whole: u64) -> Option<f64> {
    (whole > 0).then(|| round1(part as f64 / whole as f64 * 100.0))
}

/// Mean amount rounded to the nearest cent; zero for no items.
pub fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        return Money::ZERO;
    }
    Money::from_cents((total.cents() as f64 / count as f64).round() as i64)
}

/// Share of `part` in `total` in percent, rounded to one decimal.
pub fn share(part: Money, total: Money) -> f64 {
    if total.cents() == 0 {
        return 0.0;
    }
    round1(part.cents() as f64 / total.cents() as f64 * 100.0)
}
