//! The scoring engine: a deterministic decision tree over one evaluation.
//!
//! Rule ordering is deliberate. Discretionary operator input is the
//! highest-priority evidence: a marker overrides the volatility gate, and a
//! contradicting flow state vetoes the marker outright before any bonus is
//! applied. The fully automated fallback carries lower confidence than any
//! marker branch because it has no order-flow confirmation.

use crate::indicators;
use crate::models::{
    Candle, DiscretionaryInput, FlowState, IndicatorSet, InstrumentSpec, Marker, Recommendation,
    Side, SymbolId, Timeframe, TradeAction, TrendContext, VolatilityRegime,
};
use crate::risk::sizing;
use crate::signals::error::EvalError;
use crate::signals::{levels, volatility};

/// Fraction of the account risked to the full survival distance.
pub const DEFAULT_RISK_FRACTION: f64 = 0.9;

/// Substitute ATR (source price units) when the computed value is zero,
/// negative or NaN.
pub const DEFAULT_ATR_FALLBACK: f64 = 0.5;

/// Stretch of (price - EMA20) in ATR units beyond which price is considered
/// overextended (or oversold, on the downside).
const STRETCH_LIMIT: f64 = 2.5;

/// Everything one evaluation reads. The engine holds no state across calls;
/// all inputs are borrowed for the duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation<'a> {
    pub symbol: &'a SymbolId,
    pub timeframe: Timeframe,
    pub spec: &'a InstrumentSpec,
    /// Time-ascending OHLC window for (symbol, timeframe).
    pub window: &'a [Candle],
    pub trend: TrendContext,
    pub discretionary: DiscretionaryInput,
    /// Account balance in account currency. Positive; validated at setup.
    pub balance: f64,
    /// Fresher price than the last close, when the caller's price-selection
    /// policy provides one. Never affects which branch fires beyond moving
    /// the price itself.
    pub tick_price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    risk_fraction: f64,
    atr_fallback: f64,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            risk_fraction: DEFAULT_RISK_FRACTION,
            atr_fallback: DEFAULT_ATR_FALLBACK,
        }
    }
}

impl ScoringEngine {
    pub fn new(risk_fraction: f64, atr_fallback: f64) -> Self {
        Self {
            risk_fraction,
            atr_fallback,
        }
    }

    /// Run one full evaluation: indicators, then the decision tree.
    ///
    /// Fails only on an insufficient window; the caller treats that as "no
    /// recommendation" for this pair, never as a batch-aborting fault.
    pub fn evaluate(&self, eval: &Evaluation) -> Result<Recommendation, EvalError> {
        let mut ind = indicators::compute(eval.window, self.atr_fallback)?;
        if let Some(tick) = eval.tick_price {
            ind.price = tick;
        }

        Ok(self.score(
            eval.symbol,
            eval.timeframe,
            eval.spec,
            &ind,
            eval.trend,
            eval.discretionary,
            eval.balance,
        ))
    }

    /// Score a precomputed indicator set. Exposed separately so callers and
    /// tests can pin exact indicator values.
    #[allow(clippy::too_many_arguments)]
    pub fn score(
        &self,
        symbol: &SymbolId,
        timeframe: Timeframe,
        spec: &InstrumentSpec,
        ind: &IndicatorSet,
        trend: TrendContext,
        discretionary: DiscretionaryInput,
        balance: f64,
    ) -> Recommendation {
        let price = ind.price;
        let atr = ind.atr14;
        let regime = volatility::classify(atr, spec);

        let trend_bonus = match trend {
            TrendContext::Bullish => 10,
            TrendContext::Bearish => -10,
            TrendContext::Unknown => 0,
        };
        let location = location_score(price, ind);

        let (action, confidence, side) = if regime == VolatilityRegime::Dead
            && discretionary.marker == Marker::None
        {
            // Dead tape and no operator conviction: stand down. Levels below
            // are long-side placeholders.
            (TradeAction::InsufficientVolatility, 10, Side::Long)
        } else {
            match discretionary.marker {
                Marker::Bull => match discretionary.flow {
                    // Contradicting order-flow evidence invalidates the
                    // marker entirely.
                    FlowState::StrongSell => (TradeAction::FalseSignal, 0, Side::Long),
                    FlowState::Absorption | FlowState::StrongBuy => (
                        TradeAction::FireLong,
                        95 + trend_bonus + location,
                        Side::Long,
                    ),
                    _ => (
                        TradeAction::AttemptLong,
                        75 + trend_bonus + location,
                        Side::Long,
                    ),
                },
                Marker::Bear => match discretionary.flow {
                    FlowState::StrongBuy | FlowState::Absorption => {
                        (TradeAction::FalseSignal, 0, Side::Short)
                    }
                    FlowState::Trap | FlowState::StrongSell => (
                        TradeAction::FireShort,
                        95 - trend_bonus - location,
                        Side::Short,
                    ),
                    _ => (
                        TradeAction::AttemptShort,
                        75 - trend_bonus - location,
                        Side::Short,
                    ),
                },
                Marker::None => automated_read(price, ind, trend_bonus),
            }
        };

        let (stop_loss, take_profit) = levels::protective(side, price, atr);
        let lots = sizing::position_size(balance, price, spec, self.risk_fraction);

        Recommendation {
            symbol: symbol.clone(),
            timeframe,
            action,
            confidence: confidence.clamp(0, 100) as u8,
            price,
            stop_loss,
            take_profit,
            lots,
            regime,
        }
    }
}

/// Purely automated read used when no marker is set. Lower confidence than
/// any marker branch.
fn automated_read(price: f64, ind: &IndicatorSet, trend_bonus: i32) -> (TradeAction, i32, Side) {
    // atr14 is guaranteed positive by the fallback substitution.
    let stretch = (price - ind.ema20) / ind.atr14;

    if price > ind.ema60 && price < ind.ema20 {
        // Pulled back toward the fast average from above the medium one.
        (TradeAction::WatchLong, 60 + trend_bonus, Side::Long)
    } else if price > ind.ema240 && price < ind.ema60 {
        (TradeAction::DefensiveHold, 55 + trend_bonus, Side::Long)
    } else if stretch > STRETCH_LIMIT {
        (TradeAction::Overextended, 70 - trend_bonus, Side::Short)
    } else if stretch < -STRETCH_LIMIT {
        (TradeAction::Oversold, 70 + trend_bonus, Side::Long)
    } else {
        (TradeAction::RangeBound, 20, Side::Long)
    }
}

/// Small adjustment for where price sits in the EMA stack. Below all three
/// averages is penalized hardest.
fn location_score(price: f64, ind: &IndicatorSet) -> i32 {
    if price > ind.ema20 {
        5
    } else if price > ind.ema60 {
        2
    } else if price > ind.ema240 {
        -2
    } else {
        -5
    }
}
