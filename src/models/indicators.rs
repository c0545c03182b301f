use serde::{Deserialize, Serialize};

/// Derived indicator values, each evaluated at the window's last bar.
///
/// Computed fresh for every evaluation and never cached inside the core; any
/// caching is an external concern with its own invalidation policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Current price; defaults to the last close, the caller may substitute a
    /// fresher tick before scoring.
    pub price: f64,
    pub ema20: f64,
    pub ema60: f64,
    pub ema240: f64,
    pub atr14: f64,
}
