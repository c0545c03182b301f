//! Shared numeric primitives used by the indicator layer.

/// Simple moving average over the first `period` values of `values`.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(values[..period].iter().sum::<f64>() / period as f64)
}

/// Exponential moving average over `values`, evaluated at the last element.
///
/// The average is seeded with the SMA of the first `period` values and then
/// rolled forward with the standard smoothing factor `2 / (period + 1)`.
/// When the series is shorter than `period` the seed degrades to the SMA of
/// whatever history is available; callers that cannot tolerate a degraded
/// seed must enforce their own minimum window length.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if values.is_empty() || period == 0 {
        return None;
    }

    let seed_len = period.min(values.len());
    let mut ema = values[..seed_len].iter().sum::<f64>() / seed_len as f64;

    let k = 2.0 / (period as f64 + 1.0);
    for value in &values[seed_len..] {
        ema = value * k + ema * (1.0 - k);
    }

    Some(ema)
}

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Wilder-smoothed average of `tr_values`, evaluated at the last element.
///
/// Seeded with the plain mean of the first `period` true ranges, then
/// `atr = (prev_atr * (period - 1) + tr) / period` for each subsequent value.
pub fn wilder_smooth(tr_values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || tr_values.len() < period {
        return None;
    }

    let mut atr = tr_values[..period].iter().sum::<f64>() / period as f64;
    for tr in &tr_values[period..] {
        atr = (atr * (period as f64 - 1.0) + tr) / period as f64;
    }

    Some(atr)
}

/// Round to two decimal places (lot precision).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
