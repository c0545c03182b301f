//! The refresh cycle: fetch, resolve context, evaluate, publish.
//!
//! One cycle walks every instrument in the catalog and every scored
//! timeframe. A failure on one pair is logged and skipped; it never aborts
//! the rest of the batch.

use crate::config::{AccountConfig, InstrumentCatalog};
use crate::core::state::{DiscretionaryStore, RecommendationBoard, ScanEntry, TrendCache};
use crate::metrics::Metrics;
use crate::models::{InstrumentSpec, SymbolId, Timeframe, TrendContext};
use crate::services::market_data::{Freshness, MarketDataProvider, PriceSelection, Tick};
use crate::signals::engine::{Evaluation, ScoringEngine};
use crate::signals::trend_context;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Bars requested per window; enough to fully seed EMA240 plus slack.
pub const WINDOW_LIMIT: usize = 250;

/// Confidence at or above which a recommendation raises an alert.
pub const ALERT_CONFIDENCE: u8 = 85;

pub struct Scanner {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    catalog: Arc<InstrumentCatalog>,
    account: AccountConfig,
    engine: ScoringEngine,
    price_selection: PriceSelection,
    discretionary: Arc<DiscretionaryStore>,
    trend_cache: Arc<TrendCache>,
    board: Arc<RecommendationBoard>,
    metrics: Option<Arc<Metrics>>,
}

impl Scanner {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: Arc<dyn MarketDataProvider + Send + Sync>,
        catalog: Arc<InstrumentCatalog>,
        account: AccountConfig,
        engine: ScoringEngine,
        price_selection: PriceSelection,
        discretionary: Arc<DiscretionaryStore>,
        trend_cache: Arc<TrendCache>,
        board: Arc<RecommendationBoard>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self {
            provider,
            catalog,
            account,
            engine,
            price_selection,
            discretionary,
            trend_cache,
            board,
            metrics,
        }
    }

    /// Run scan cycles forever at the given interval.
    pub async fn run(&self, interval: std::time::Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// One full pass over the catalog.
    pub async fn run_cycle(&self) {
        let started = Instant::now();
        let mut published = 0usize;

        for (symbol, spec) in self.catalog.iter() {
            let trend = self.resolve_trend(symbol, spec).await;
            let tick = self.latest_tick(symbol, spec).await;

            for timeframe in Timeframe::SCORED {
                if self.evaluate_pair(symbol, spec, timeframe, trend, tick.as_ref()).await {
                    published += 1;
                }
            }
        }

        if let Some(ref metrics) = self.metrics {
            metrics.scan_cycles_total.inc();
        }
        info!(
            published,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scan cycle complete"
        );
    }

    /// Record whether the last provider call succeeded.
    fn note_provider(&self, connected: bool) {
        if let Some(ref metrics) = self.metrics {
            metrics
                .provider_connected
                .set(if connected { 1.0 } else { 0.0 });
        }
    }

    /// Trend context for one instrument, via the TTL cache. Provider failure
    /// degrades to Unknown rather than failing the instrument.
    async fn resolve_trend(&self, symbol: &SymbolId, spec: &InstrumentSpec) -> TrendContext {
        if let Some(trend) = self.trend_cache.get(symbol).await {
            return trend;
        }

        let trend = match self
            .provider
            .get_candles(&spec.data_symbol, Timeframe::TREND, WINDOW_LIMIT)
            .await
        {
            Ok(window) => {
                self.note_provider(true);
                trend_context::resolve(&window)
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "trend window fetch failed");
                self.note_provider(false);
                TrendContext::Unknown
            }
        };

        self.trend_cache.set(symbol.clone(), trend).await;
        trend
    }

    async fn latest_tick(&self, symbol: &SymbolId, spec: &InstrumentSpec) -> Option<Tick> {
        match self.provider.get_latest_tick(&spec.data_symbol).await {
            Ok(tick) => {
                self.note_provider(true);
                tick
            }
            Err(e) => {
                debug!(symbol = %symbol, error = %e, "tick fetch failed");
                self.note_provider(false);
                None
            }
        }
    }

    /// Evaluate one (instrument, timeframe) pair and publish the result.
    /// Returns whether a recommendation was published.
    async fn evaluate_pair(
        &self,
        symbol: &SymbolId,
        spec: &InstrumentSpec,
        timeframe: Timeframe,
        trend: TrendContext,
        tick: Option<&Tick>,
    ) -> bool {
        let window = match self
            .provider
            .get_candles(&spec.data_symbol, timeframe, WINDOW_LIMIT)
            .await
        {
            Ok(window) => {
                self.note_provider(true);
                window
            }
            Err(e) => {
                warn!(symbol = %symbol, timeframe = %timeframe, error = %e, "window fetch failed");
                self.note_provider(false);
                if let Some(ref metrics) = self.metrics {
                    metrics.evaluation_failures_total.inc();
                }
                return false;
            }
        };

        let now = Utc::now();
        let discretionary = self.discretionary.get(symbol, timeframe).await;
        let evaluation = Evaluation {
            symbol,
            timeframe,
            spec,
            window: &window,
            trend,
            discretionary,
            balance: self.account.balance,
            tick_price: self.price_selection.tick_override(tick, now),
        };

        let eval_started = Instant::now();
        let recommendation = match self.engine.evaluate(&evaluation) {
            Ok(recommendation) => recommendation,
            Err(e) => {
                debug!(symbol = %symbol, timeframe = %timeframe, error = %e, "no recommendation");
                if let Some(ref metrics) = self.metrics {
                    metrics.evaluation_failures_total.inc();
                }
                return false;
            }
        };

        if let Some(ref metrics) = self.metrics {
            metrics.evaluations_total.inc();
            metrics
                .evaluation_duration_seconds
                .observe(eval_started.elapsed().as_secs_f64());
        }

        if recommendation.confidence >= ALERT_CONFIDENCE {
            info!(
                symbol = %symbol,
                timeframe = %timeframe,
                action = %recommendation.action,
                confidence = recommendation.confidence,
                lots = recommendation.lots,
                "high-confidence signal"
            );
            if let Some(ref metrics) = self.metrics {
                metrics.high_confidence_signals_total.inc();
            }
        } else {
            debug!(
                symbol = %symbol,
                timeframe = %timeframe,
                action = %recommendation.action,
                confidence = recommendation.confidence,
                "evaluated"
            );
        }

        self.board
            .publish(ScanEntry {
                recommendation,
                freshness: Freshness::classify(tick, now),
                generated_at: now,
            })
            .await;

        true
    }
}
