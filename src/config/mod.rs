//! Environment-driven configuration: account settings and the instrument
//! catalog.
//!
//! Invalid configuration is a setup-time error. Everything here validates
//! eagerly so a bad spec or an unknown symbol is rejected before the first
//! evaluation, never discovered mid-batch.

use crate::models::{InstrumentSpec, SymbolId};
use crate::signals::engine::{DEFAULT_ATR_FALLBACK, DEFAULT_RISK_FRACTION};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no instrument spec configured for symbol '{0}'")]
    UnknownSymbol(SymbolId),
    #[error("invalid instrument spec for '{symbol}': {reason}")]
    InvalidSpec { symbol: SymbolId, reason: String },
    #[error("invalid account config: {0}")]
    InvalidAccount(String),
    #[error("failed to read instrument catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse instrument catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Deployment environment, used to pick log formatting.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000)
}

pub fn get_scan_interval_seconds() -> u64 {
    env::var("SCAN_INTERVAL_SECONDS")
        .ok()
        .and_then(|i| i.parse().ok())
        .unwrap_or(60)
}

/// ATR substitute for degenerate values, in source price units.
pub fn get_atr_fallback() -> f64 {
    env::var("ATR_FALLBACK")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_ATR_FALLBACK)
}

/// Account-level risk settings supplied by the operator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Balance in account currency.
    pub balance: f64,
    /// Fraction of the balance risked to the full survival distance.
    pub risk_fraction: f64,
}

impl AccountConfig {
    pub fn new(balance: f64, risk_fraction: f64) -> Result<Self, ConfigError> {
        if !balance.is_finite() || balance <= 0.0 {
            return Err(ConfigError::InvalidAccount(format!(
                "balance must be positive, got {balance}"
            )));
        }
        if !risk_fraction.is_finite() || risk_fraction <= 0.0 || risk_fraction > 1.0 {
            return Err(ConfigError::InvalidAccount(format!(
                "risk_fraction must be in (0, 1], got {risk_fraction}"
            )));
        }
        Ok(Self {
            balance,
            risk_fraction,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let balance = env::var("ACCOUNT_BALANCE")
            .ok()
            .and_then(|b| b.parse().ok())
            .unwrap_or(1000.0);
        let risk_fraction = env::var("RISK_FRACTION")
            .ok()
            .and_then(|r| r.parse().ok())
            .unwrap_or(DEFAULT_RISK_FRACTION);
        Self::new(balance, risk_fraction)
    }
}

/// The per-symbol configuration table. Floors and survival distances are a
/// trading-strategy calibration, so they live in config (optionally a JSON
/// file), not in engine code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentCatalog {
    instruments: HashMap<SymbolId, InstrumentSpec>,
}

impl InstrumentCatalog {
    pub fn new(instruments: HashMap<SymbolId, InstrumentSpec>) -> Result<Self, ConfigError> {
        let catalog = Self { instruments };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Catalog from `INSTRUMENTS_PATH` when set, built-in defaults otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var("INSTRUMENTS_PATH") {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let instruments: HashMap<SymbolId, InstrumentSpec> = serde_json::from_str(raw)?;
        Self::new(instruments)
    }

    /// Spec lookup keyed by instrument identity. A missing entry is a
    /// configuration error, surfaced eagerly.
    pub fn get(&self, symbol: &SymbolId) -> Result<&InstrumentSpec, ConfigError> {
        self.instruments
            .get(symbol)
            .ok_or_else(|| ConfigError::UnknownSymbol(symbol.clone()))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &SymbolId> {
        self.instruments.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SymbolId, &InstrumentSpec)> {
        self.instruments.iter()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (symbol, spec) in &self.instruments {
            let invalid = |reason: &str| ConfigError::InvalidSpec {
                symbol: symbol.clone(),
                reason: reason.to_string(),
            };
            if spec.display_name.is_empty() {
                return Err(invalid("display_name is empty"));
            }
            if spec.data_symbol.is_empty() {
                return Err(invalid("data_symbol is empty"));
            }
            if !spec.contract_size.is_finite() || spec.contract_size <= 0.0 {
                return Err(invalid("contract_size must be positive"));
            }
            if !spec.survival_distance.is_finite() || spec.survival_distance <= 0.0 {
                return Err(invalid("survival_distance must be positive"));
            }
            if !spec.volatility_floor.is_finite() || spec.volatility_floor < 0.0 {
                return Err(invalid("volatility_floor must be non-negative"));
            }
        }
        Ok(())
    }
}

impl Default for InstrumentCatalog {
    /// Built-in calibration for the default watchlist. Values are a starting
    /// point, not a recommendation; deployments override them via
    /// `INSTRUMENTS_PATH`.
    fn default() -> Self {
        let mut instruments = HashMap::new();
        instruments.insert(
            SymbolId::from("gold"),
            InstrumentSpec {
                display_name: "Gold".to_string(),
                data_symbol: "XAUUSD=X".to_string(),
                contract_size: 100.0,
                survival_distance: 100.0,
                volatility_floor: 1.0,
                quote_converted: false,
            },
        );
        instruments.insert(
            SymbolId::from("silver"),
            InstrumentSpec {
                display_name: "Silver".to_string(),
                data_symbol: "XAGUSD=X".to_string(),
                contract_size: 5000.0,
                survival_distance: 4.0,
                volatility_floor: 0.05,
                quote_converted: false,
            },
        );
        instruments.insert(
            SymbolId::from("us30"),
            InstrumentSpec {
                display_name: "Dow Jones (US30)".to_string(),
                data_symbol: "YM=F".to_string(),
                contract_size: 5.0,
                survival_distance: 100.0,
                volatility_floor: 20.0,
                quote_converted: false,
            },
        );
        instruments.insert(
            SymbolId::from("gbpusd"),
            InstrumentSpec {
                display_name: "British Pound".to_string(),
                data_symbol: "GBPUSD=X".to_string(),
                contract_size: 100_000.0,
                survival_distance: 0.02,
                volatility_floor: 0.0,
                quote_converted: false,
            },
        );
        instruments.insert(
            SymbolId::from("usdjpy"),
            InstrumentSpec {
                display_name: "Dollar-Yen".to_string(),
                data_symbol: "USDJPY=X".to_string(),
                contract_size: 100_000.0,
                survival_distance: 2.0,
                volatility_floor: 0.02,
                quote_converted: true,
            },
        );

        // Defaults are validated by construction.
        Self { instruments }
    }
}
