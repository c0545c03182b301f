//! Risk sizing calculator.
//!
//! Pure capital-at-risk arithmetic: it knows nothing about scoring or market
//! direction, only how many lots the balance tolerates across the
//! instrument's survival distance.

use crate::common::math;
use crate::models::InstrumentSpec;

/// Smallest size ever suggested, regardless of how tiny the computed value
/// is.
pub const MIN_LOTS: f64 = 0.01;

/// Lots the account can carry to the full survival distance.
///
/// Base formula: `lots = balance * risk_fraction / (contract_size *
/// survival_distance)`. Quote-converted instruments (e.g. yen pairs) keep
/// their survival distance in the quote unit, so the risk budget is converted
/// through the current price before dividing; skipping that step would
/// mis-size those instruments by the price's order of magnitude.
pub fn position_size(
    balance: f64,
    price: f64,
    spec: &InstrumentSpec,
    risk_fraction: f64,
) -> f64 {
    let mut budget = balance * risk_fraction;
    if spec.quote_converted {
        budget *= price;
    }

    let raw = budget / (spec.contract_size * spec.survival_distance);
    math::round2(raw).max(MIN_LOTS)
}
