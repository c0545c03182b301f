//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::Candle;

/// Wilder-smoothed ATR over the window, evaluated at the last bar.
///
/// True ranges need a previous close, so a window of `n` bars yields `n - 1`
/// range samples. When fewer than `period` samples exist the value degrades
/// to the plain mean of the available ranges, mirroring the degraded EMA
/// seed; callers that cannot tolerate a degraded value must enforce their
/// own minimum window length. Returns `None` only when no true range exists
/// at all (fewer than two bars).
/// Degenerate results (a flat window gives ATR 0) are the caller's problem;
/// `indicators::compute` substitutes the configured fallback constant.
pub fn calculate(candles: &[Candle], period: usize) -> Option<f64> {
    if candles.len() < 2 || period == 0 {
        return None;
    }

    let mut tr_values = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        tr_values.push(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));
    }

    if tr_values.len() < period {
        return Some(tr_values.iter().sum::<f64>() / tr_values.len() as f64);
    }

    math::wilder_smooth(&tr_values, period)
}

/// ATR with the conventional period of 14.
pub fn calculate_default(candles: &[Candle]) -> Option<f64> {
    calculate(candles, 14)
}
