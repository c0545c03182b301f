use crate::models::instrument::{SymbolId, Timeframe};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Volatility regime of an instrument relative to its configured ATR floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityRegime {
    Active,
    Dead,
}

/// Directional bias implied by an action, used to place protective levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Long,
    Short,
}

/// The engine's tactical verdict for one (instrument, timeframe) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    FireLong,
    AttemptLong,
    FireShort,
    AttemptShort,
    FalseSignal,
    WatchLong,
    DefensiveHold,
    Overextended,
    Oversold,
    RangeBound,
    InsufficientVolatility,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradeAction::FireLong => "fire long",
            TradeAction::AttemptLong => "attempt long",
            TradeAction::FireShort => "fire short",
            TradeAction::AttemptShort => "attempt short",
            TradeAction::FalseSignal => "false signal",
            TradeAction::WatchLong => "watch for long setup",
            TradeAction::DefensiveHold => "defensive hold",
            TradeAction::Overextended => "overextended, watch for short",
            TradeAction::Oversold => "oversold, watch for long",
            TradeAction::RangeBound => "range-bound / no-trade",
            TradeAction::InsufficientVolatility => "insufficient volatility",
        };
        f.write_str(label)
    }
}

/// One evaluation's output. A pure value: two evaluations over identical
/// inputs produce identical recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub symbol: SymbolId,
    pub timeframe: Timeframe,
    pub action: TradeAction,
    /// Estimated win-rate style score, always within 0..=100.
    pub confidence: u8,
    /// Price the evaluation was scored against.
    pub price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Suggested position size in lots, never below 0.01.
    pub lots: f64,
    pub regime: VolatilityRegime,
}
