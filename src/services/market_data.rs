//! Market data provider interface and price-selection policy.

use crate::models::{Candle, Timeframe};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Most recent traded price, independent of the bar series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

/// How recently the provider saw a trade. Display metadata only; it never
/// alters scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    Fresh,
    Stale,
    VeryStale,
}

const FRESH_MAX_SECONDS: i64 = 90;
const STALE_MAX_SECONDS: i64 = 300;

impl Freshness {
    /// Classify a tick's age. No tick at all counts as very stale.
    pub fn classify(tick: Option<&Tick>, now: DateTime<Utc>) -> Freshness {
        let Some(tick) = tick else {
            return Freshness::VeryStale;
        };
        let age = now - tick.timestamp;
        if age <= Duration::seconds(FRESH_MAX_SECONDS) {
            Freshness::Fresh
        } else if age <= Duration::seconds(STALE_MAX_SECONDS) {
            Freshness::Stale
        } else {
            Freshness::VeryStale
        }
    }
}

/// Which price an evaluation scores against. A policy decision, kept
/// swappable so tests can pin a deterministic price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSelection {
    /// Always the last closed bar.
    LastClose,
    /// Prefer a tick no older than `max_age_seconds`, fall back to the last
    /// close otherwise.
    PreferFreshTick { max_age_seconds: i64 },
}

impl Default for PriceSelection {
    fn default() -> Self {
        PriceSelection::PreferFreshTick {
            max_age_seconds: 120,
        }
    }
}

impl PriceSelection {
    /// The tick price to substitute for the last close, when the policy
    /// allows one.
    pub fn tick_override(&self, tick: Option<&Tick>, now: DateTime<Utc>) -> Option<f64> {
        match self {
            PriceSelection::LastClose => None,
            PriceSelection::PreferFreshTick { max_age_seconds } => tick
                .filter(|t| now - t.timestamp <= Duration::seconds(*max_age_seconds))
                .map(|t| t.price),
        }
    }
}

/// Supplies bar windows and ticks. Implementations own their transport;
/// consumers only see candles.
#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Time-ascending window of the most recent `limit` bars for
    /// (data symbol, timeframe).
    async fn get_candles(
        &self,
        data_symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError>;

    /// Most recent tick, when the provider has one.
    async fn get_latest_tick(&self, data_symbol: &str) -> Result<Option<Tick>, ProviderError>;
}
