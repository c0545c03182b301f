//! Tactrix Scanner
//!
//! Headless scan loop: evaluates every instrument and timeframe on an
//! interval and raises high-confidence alerts through structured logs. Run
//! this when the HTTP surface is not needed.

use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tactrix::config::{self, AccountConfig, InstrumentCatalog};
use tactrix::core::scan::Scanner;
use tactrix::core::state::{DiscretionaryStore, RecommendationBoard, TrendCache};
use tactrix::logging;
use tactrix::metrics::Metrics;
use tactrix::services::market_data::{MarketDataProvider, PriceSelection};
use tactrix::services::yahoo::YahooMarketDataProvider;
use tactrix::signals::engine::ScoringEngine;
use tokio::signal;
use tracing::info;

const TREND_CACHE_TTL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = config::get_environment();
    info!("Starting Tactrix Scanner");
    info!(environment = %env, "Environment");

    let scan_interval = config::get_scan_interval_seconds();
    if scan_interval == 0 {
        return Err("SCAN_INTERVAL_SECONDS must be > 0".into());
    }

    let account = AccountConfig::from_env()?;
    let catalog = Arc::new(InstrumentCatalog::load()?);
    info!(
        instruments = catalog.len(),
        balance = account.balance,
        interval = scan_interval,
        "Configuration loaded"
    );

    let metrics = Arc::new(Metrics::new()?);
    let provider: Arc<dyn MarketDataProvider + Send + Sync> =
        Arc::new(YahooMarketDataProvider::new());
    let engine = ScoringEngine::new(account.risk_fraction, config::get_atr_fallback());

    let scanner = Scanner::new(
        provider,
        catalog,
        account,
        engine,
        PriceSelection::default(),
        Arc::new(DiscretionaryStore::new()),
        Arc::new(TrendCache::new(TREND_CACHE_TTL)),
        Arc::new(RecommendationBoard::new()),
        Some(metrics),
    );

    tokio::select! {
        _ = scanner.run(Duration::from_secs(scan_interval)) => {}
        _ = signal::ctrl_c() => {
            info!("Shutting down scanner...");
        }
    }

    Ok(())
}
