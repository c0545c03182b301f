use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLC bar.
///
/// Windows of candles are time-ascending with the most recent bar last; the
/// last close is the authoritative "current price" unless the caller swaps
/// in a fresher tick (see `services::market_data::PriceSelection`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}
