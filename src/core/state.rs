//! Caller-owned state that outlives a single evaluation.
//!
//! The scoring engine itself is stateless; everything here belongs to the
//! service layer: operator annotations set between refresh cycles, the
//! per-instrument trend context cache, and the board of latest results.

use crate::models::{DiscretionaryInput, Recommendation, SymbolId, Timeframe, TrendContext};
use crate::services::market_data::Freshness;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Discretionary annotations keyed by (instrument, timeframe). Explicit
/// shared state passed into evaluations, not an ambient global: the engine
/// receives a copy per call and stays a pure function.
#[derive(Default)]
pub struct DiscretionaryStore {
    entries: RwLock<HashMap<(SymbolId, Timeframe), DiscretionaryInput>>,
}

impl DiscretionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current annotation, defaulting to no marker / neutral flow.
    pub async fn get(&self, symbol: &SymbolId, timeframe: Timeframe) -> DiscretionaryInput {
        self.entries
            .read()
            .await
            .get(&(symbol.clone(), timeframe))
            .copied()
            .unwrap_or_default()
    }

    pub async fn set(
        &self,
        symbol: SymbolId,
        timeframe: Timeframe,
        input: DiscretionaryInput,
    ) {
        self.entries
            .write()
            .await
            .insert((symbol, timeframe), input);
    }

    pub async fn clear(&self, symbol: &SymbolId, timeframe: Timeframe) {
        self.entries
            .write()
            .await
            .remove(&(symbol.clone(), timeframe));
    }

    pub async fn snapshot(&self) -> Vec<(SymbolId, Timeframe, DiscretionaryInput)> {
        self.entries
            .read()
            .await
            .iter()
            .map(|((s, tf), input)| (s.clone(), *tf, *input))
            .collect()
    }
}

/// Higher-timeframe trend context per instrument, refreshed on a short TTL.
/// Staleness here is a display/efficiency tradeoff, not a correctness
/// requirement of the resolver.
pub struct TrendCache {
    ttl: Duration,
    entries: RwLock<HashMap<SymbolId, (TrendContext, Instant)>>,
}

impl TrendCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, symbol: &SymbolId) -> Option<TrendContext> {
        let entries = self.entries.read().await;
        let (trend, resolved_at) = entries.get(symbol)?;
        if resolved_at.elapsed() <= self.ttl {
            Some(*trend)
        } else {
            None
        }
    }

    pub async fn set(&self, symbol: SymbolId, trend: TrendContext) {
        self.entries
            .write()
            .await
            .insert(symbol, (trend, Instant::now()));
    }
}

/// One published scan result: the pure recommendation plus display metadata
/// the core does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEntry {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub freshness: Freshness,
    pub generated_at: DateTime<Utc>,
}

/// Latest recommendation per (instrument, timeframe), replaced wholesale
/// each cycle. Past recommendations are deliberately not kept.
#[derive(Default)]
pub struct RecommendationBoard {
    entries: RwLock<HashMap<(SymbolId, Timeframe), ScanEntry>>,
}

impl RecommendationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn publish(&self, entry: ScanEntry) {
        let key = (
            entry.recommendation.symbol.clone(),
            entry.recommendation.timeframe,
        );
        self.entries.write().await.insert(key, entry);
    }

    /// All entries, highest confidence first.
    pub async fn snapshot(&self) -> Vec<ScanEntry> {
        let mut entries: Vec<ScanEntry> = self.entries.read().await.values().cloned().collect();
        entries.sort_by(|a, b| {
            b.recommendation
                .confidence
                .cmp(&a.recommendation.confidence)
        });
        entries
    }

    pub async fn for_symbol(&self, symbol: &SymbolId) -> Vec<ScanEntry> {
        let mut entries: Vec<ScanEntry> = self
            .entries
            .read()
            .await
            .values()
            .filter(|e| &e.recommendation.symbol == symbol)
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            b.recommendation
                .confidence
                .cmp(&a.recommendation.confidence)
        });
        entries
    }
}
