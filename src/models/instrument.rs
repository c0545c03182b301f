use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a tradable instrument, the key into the instrument catalog.
///
/// Per-instrument constants (contract size, volatility floor, ...) are looked
/// up by this identity, never by matching substrings of display names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub String);

impl SymbolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Immutable per-symbol configuration, created once at setup and shared
/// read-only across evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Human-facing name used in logs and API responses.
    pub display_name: String,
    /// Ticker understood by the market data provider (e.g. `XAUUSD=X`).
    pub data_symbol: String,
    /// Units per lot.
    pub contract_size: f64,
    /// Adverse price excursion (instrument units) the account must tolerate.
    pub survival_distance: f64,
    /// Minimum ATR(14) below which the instrument is considered dead.
    pub volatility_floor: f64,
    /// True for instruments quoted in a foreign unit (e.g. yen pairs), where
    /// the risk budget must be converted through the current price before
    /// sizing.
    #[serde(default)]
    pub quote_converted: bool,
}

/// Bar interval. `M5` and `M15` are scored; `H1` supplies the trend context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    M5,
    M15,
    H1,
}

impl Timeframe {
    /// Timeframes the scoring engine runs on each cycle.
    pub const SCORED: [Timeframe; 2] = [Timeframe::M5, Timeframe::M15];

    /// Higher timeframe used by the trend context resolver.
    pub const TREND: Timeframe = Timeframe::H1;

    /// Interval code understood by the market data provider.
    pub fn code(&self) -> &'static str {
        match self {
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::H1 => "60m",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::M5 => f.write_str("m5"),
            Timeframe::M15 => f.write_str("m15"),
            Timeframe::H1 => f.write_str("h1"),
        }
    }
}

impl std::str::FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m5" => Ok(Timeframe::M5),
            "m15" => Ok(Timeframe::M15),
            "h1" => Ok(Timeframe::H1),
            other => Err(format!("unknown timeframe '{other}'")),
        }
    }
}
