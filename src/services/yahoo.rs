//! Yahoo Finance chart API market data provider.
//!
//! Fetches `/v8/finance/chart/{symbol}` JSON over HTTPS with exponential
//! backoff. Rows with missing OHLC fields are dropped, matching the
//! upstream's habit of publishing partially-filled bars for FX symbols.

use crate::models::{Candle, Timeframe};
use crate::services::market_data::{MarketDataProvider, ProviderError, Tick};
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooMarketDataProvider {
    pub fn new() -> Self {
        Self::with_base_url(
            std::env::var("YAHOO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        )
    }

    /// Point the provider at a different host (tests use a mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn fetch_chart(
        &self,
        data_symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<ChartResult, ProviderError> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval={}&range={}",
            self.base_url, data_symbol, interval, range
        );

        let response = (|| async {
            self.client
                .get(&url)
                .send()
                .await?
                .error_for_status()
        })
        .retry(ExponentialBuilder::default())
        .await?;

        let body: ChartResponse = response.json().await?;

        if let Some(error) = body.chart.error {
            return Err(format!("chart API error for {data_symbol}: {error}").into());
        }

        body.chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| format!("empty chart result for {data_symbol}").into())
    }
}

impl Default for YahooMarketDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_candles(
        &self,
        data_symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let result = self
            .fetch_chart(data_symbol, timeframe.code(), "5d")
            .await?;

        let quote = result
            .indicators
            .quote
            .first()
            .ok_or_else(|| format!("no quote block for {data_symbol}"))?;

        let mut candles = Vec::with_capacity(result.timestamp.len());
        for (i, &ts) in result.timestamp.iter().enumerate() {
            let row = (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
            );
            let (Some(open), Some(high), Some(low), Some(close)) = row else {
                continue;
            };
            let Some(timestamp) = DateTime::from_timestamp(ts, 0) else {
                continue;
            };
            let volume = quote
                .volume
                .get(i)
                .copied()
                .flatten()
                .unwrap_or(0.0);
            candles.push(Candle::new(open, high, low, close, volume, timestamp));
        }

        candles.sort_by_key(|c| c.timestamp);
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }

        debug!(
            symbol = data_symbol,
            timeframe = %timeframe,
            count = candles.len(),
            "fetched candle window"
        );

        Ok(candles)
    }

    async fn get_latest_tick(&self, data_symbol: &str) -> Result<Option<Tick>, ProviderError> {
        let result = self
            .fetch_chart(data_symbol, Timeframe::M5.code(), "1d")
            .await?;

        let tick = match (
            result.meta.regular_market_price,
            result.meta.regular_market_time,
        ) {
            (Some(price), Some(ts)) => DateTime::from_timestamp(ts, 0)
                .map(|timestamp| Tick { price, timestamp }),
            _ => None,
        };

        Ok(tick)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "regularMarketTime")]
    regular_market_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
