//! Trend context resolver.
//!
//! Derives a per-instrument directional bias from a higher timeframe (H1)
//! than the ones being scored. Resolved once per instrument per refresh
//! cycle and shared across all scored timeframes; freshness is the caller's
//! caching concern, not a correctness requirement here.

use crate::indicators::trend::ema;
use crate::models::{Candle, TrendContext};

/// Bullish if the last close sits above the higher-timeframe EMA20, Bearish
/// otherwise, Unknown when the computation fails (empty window).
pub fn resolve(window: &[Candle]) -> TrendContext {
    let Some(last) = window.last() else {
        return TrendContext::Unknown;
    };

    let closes: Vec<f64> = window.iter().map(|c| c.close).collect();
    match ema::calculate(&closes, 20) {
        Some(ema20) if last.close > ema20 => TrendContext::Bullish,
        Some(_) => TrendContext::Bearish,
        None => TrendContext::Unknown,
    }
}
