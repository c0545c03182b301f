//! Tactrix API Server
//!
//! Runs the scan loop in the background and serves the recommendation board,
//! instrument catalog and operator input endpoints over HTTP.

use dotenvy::dotenv;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tactrix::config::{self, AccountConfig, InstrumentCatalog};
use tactrix::core::http::{self, AppState, HealthStatus};
use tactrix::core::scan::Scanner;
use tactrix::core::state::{DiscretionaryStore, RecommendationBoard, TrendCache};
use tactrix::logging;
use tactrix::metrics::Metrics;
use tactrix::services::market_data::{MarketDataProvider, PriceSelection};
use tactrix::services::yahoo::YahooMarketDataProvider;
use tactrix::signals::engine::ScoringEngine;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::info;

const TREND_CACHE_TTL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let env = config::get_environment();
    info!("Starting Tactrix API Server");
    info!(environment = %env, "Environment");

    let port = config::get_port();
    let scan_interval = config::get_scan_interval_seconds();
    if scan_interval == 0 {
        return Err("SCAN_INTERVAL_SECONDS must be > 0".into());
    }

    let account = AccountConfig::from_env()?;
    let catalog = Arc::new(InstrumentCatalog::load()?);
    info!(
        instruments = catalog.len(),
        balance = account.balance,
        "Configuration loaded"
    );

    let metrics = Arc::new(Metrics::new()?);
    let board = Arc::new(RecommendationBoard::new());
    let discretionary = Arc::new(DiscretionaryStore::new());
    let trend_cache = Arc::new(TrendCache::new(TREND_CACHE_TTL));
    let provider: Arc<dyn MarketDataProvider + Send + Sync> =
        Arc::new(YahooMarketDataProvider::new());

    let engine = ScoringEngine::new(account.risk_fraction, config::get_atr_fallback());
    let scanner = Scanner::new(
        provider,
        catalog.clone(),
        account,
        engine,
        PriceSelection::default(),
        discretionary.clone(),
        trend_cache,
        board.clone(),
        Some(metrics.clone()),
    );

    info!(interval = scan_interval, "Starting scan loop");
    let scan_handle = tokio::spawn(async move {
        scanner.run(Duration::from_secs(scan_interval)).await;
    });

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        catalog,
        board,
        discretionary,
    };

    tokio::select! {
        result = http::start_server(port, state) => {
            scan_handle.abort();
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            scan_handle.abort();
        }
    }

    Ok(())
}
