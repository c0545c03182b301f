//! Indicator computation over OHLC windows.

pub mod error;
pub mod trend;
pub mod volatility;

pub use error::IndicatorError;

use crate::models::{Candle, IndicatorSet};

/// Hard minimum window length; shorter windows fail with
/// [`IndicatorError::InsufficientData`] instead of producing a wrong score.
pub const MIN_BARS: usize = 10;

/// Compute the full indicator set for a window, evaluated at the last bar.
///
/// EMAs and the ATR degrade gracefully on windows shorter than their period
/// (the EMA seed falls back to the available history, the ATR to the mean of
/// the available true ranges); a degenerate ATR (zero, negative or NaN) is
/// replaced by `atr_fallback` so downstream scoring never divides by zero.
pub fn compute(window: &[Candle], atr_fallback: f64) -> Result<IndicatorSet, IndicatorError> {
    if window.len() < MIN_BARS {
        return Err(IndicatorError::InsufficientData {
            have: window.len(),
            need: MIN_BARS,
        });
    }

    let price = window[window.len() - 1].close;
    let closes: Vec<f64> = window.iter().map(|c| c.close).collect();

    // MIN_BARS > 0 guarantees the closes are non-empty.
    let ema20 = trend::ema::calculate(&closes, 20).unwrap_or(price);
    let ema60 = trend::ema::calculate(&closes, 60).unwrap_or(price);
    let ema240 = trend::ema::calculate(&closes, 240).unwrap_or(price);

    let atr14 = volatility::atr::calculate(window, 14)
        .filter(|atr| atr.is_finite() && *atr > 0.0)
        .unwrap_or(atr_fallback);

    Ok(IndicatorSet {
        price,
        ema20,
        ema60,
        ema240,
        atr14,
    })
}
