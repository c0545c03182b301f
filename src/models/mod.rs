//! Shared data models spanning the engine layers.

pub mod candle;
pub mod discretionary;
pub mod indicators;
pub mod instrument;
pub mod recommendation;

pub use candle::Candle;
pub use discretionary::{DiscretionaryInput, FlowState, Marker, TrendContext};
pub use indicators::IndicatorSet;
pub use instrument::{InstrumentSpec, SymbolId, Timeframe};
pub use recommendation::{Recommendation, Side, TradeAction, VolatilityRegime};
