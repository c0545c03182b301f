//! Volatility gate.
//!
//! Absolute ATR is not comparable across gold, silver, an index and an FX
//! pair, so each instrument carries its own floor in its spec. The gate does
//! not unconditionally block scoring: a discretionary marker overrides it
//! (see `signals::engine`).

use crate::models::{InstrumentSpec, VolatilityRegime};

/// Dead when the current ATR(14) is below the instrument's configured floor.
pub fn classify(atr14: f64, spec: &InstrumentSpec) -> VolatilityRegime {
    if atr14 < spec.volatility_floor {
        VolatilityRegime::Dead
    } else {
        VolatilityRegime::Active
    }
}
