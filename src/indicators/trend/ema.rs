//! EMA (Exponential Moving Average) indicator

use crate::common::math;

/// EMA of a close series evaluated at the last element.
///
/// Scoring is sensitive to the seed: windows shorter than `period` seed from
/// whatever history exists (see `common::math::ema`), so an EMA240 over 120
/// bars is a best-effort value, not a fully seeded one.
pub fn calculate(closes: &[f64], period: usize) -> Option<f64> {
    math::ema(closes, period)
}

/// Calculate multiple EMAs at once, skipping periods that cannot be computed.
pub fn calculate_many(closes: &[f64], periods: &[usize]) -> Vec<f64> {
    periods
        .iter()
        .filter_map(|&period| calculate(closes, period))
        .collect()
}
