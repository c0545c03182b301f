//! Protective price levels derived from ATR multiples.

use crate::models::Side;

pub const STOP_ATR_MULT: f64 = 1.5;
pub const TAKE_PROFIT_ATR_MULT: f64 = 2.5;

/// Stop-loss and take-profit for the given side, anchored at `price`.
pub fn protective(side: Side, price: f64, atr: f64) -> (f64, f64) {
    match side {
        Side::Long => (
            price - STOP_ATR_MULT * atr,
            price + TAKE_PROFIT_ATR_MULT * atr,
        ),
        Side::Short => (
            price + STOP_ATR_MULT * atr,
            price - TAKE_PROFIT_ATR_MULT * atr,
        ),
    }
}
