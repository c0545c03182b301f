use serde::{Deserialize, Serialize};

/// Operator's manual directional call for one (instrument, timeframe) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    #[default]
    None,
    Bull,
    Bear,
}

/// Operator's read of cumulative volume-delta behaviour, used to confirm or
/// veto a marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Neutral,
    StrongBuy,
    StrongSell,
    Absorption,
    Trap,
}

/// Discretionary annotation set by an operator before an evaluation.
///
/// Owned by the caller (the HTTP layer keeps a store keyed by instrument and
/// timeframe); the engine only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscretionaryInput {
    pub marker: Marker,
    pub flow: FlowState,
}

/// Higher-timeframe directional bias, resolved once per instrument per
/// refresh cycle and shared across all scored timeframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendContext {
    Bullish,
    Bearish,
    Unknown,
}
