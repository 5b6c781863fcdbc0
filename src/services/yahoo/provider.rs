//! Yahoo Finance chart API market data provider

use crate::models::indicators::Candle;
use crate::services::market_data::{validate_series, MarketDataProvider, Timeframe};
use crate::signals::error::SignalError;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Deserialize)]
pub(crate) struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
}

impl YahooMarketDataProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SignalError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36")
            .build()
            .map_err(|e| SignalError::DataUnavailable(format!("HTTP client: {}", e)))?;

        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            max_retries: 3,
        }
    }


    fn chart_url(&self, symbol: &str, timeframe: Timeframe, lookback_days: u32) -> Result<Url, SignalError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SignalError::DataUnavailable(format!("invalid base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SignalError::DataUnavailable("base url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("range", &format!("{}d", lookback_days))
            .append_pair("interval", timeframe.as_str());
        Ok(url)
    }

    async fn request(&self, url: &Url) -> Result<ChartResponse, reqwest::Error> {
        self.client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<ChartResponse>()
            .await
    }
}

fn value_at(series: &[Option<f64>], i: usize) -> Option<f64> {
    series.get(i).copied().flatten()
}

/// Convert a chart response into candles.
///
/// Rows with a missing price are skipped. A trailing candle whose interval
/// has not closed at `now` is dropped so the last candle is always complete.
pub(crate) fn parse_chart(
    symbol: &str,
    response: ChartResponse,
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Result<Vec<Candle>, SignalError> {
    let data = match (response.chart.result, response.chart.error) {
        (_, Some(err)) => {
            return Err(SignalError::DataUnavailable(format!(
                "{}: {} ({})",
                symbol, err.description, err.code
            )))
        }
        (Some(result), None) => result.into_iter().next(),
        (None, None) => None,
    }
    .ok_or_else(|| SignalError::DataUnavailable(format!("{}: empty chart result", symbol)))?;

    let timestamps = data.timestamp.unwrap_or_default();
    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| SignalError::DataUnavailable(format!("{}: no quote data", symbol)))?;

    let mut candles = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
        ) else {
            continue;
        };
        let timestamp = DateTime::from_timestamp(ts, 0).ok_or_else(|| {
            SignalError::DataUnavailable(format!("{}: invalid timestamp {}", symbol, ts))
        })?;
        let volume = value_at(&quote.volume, i).unwrap_or(0.0);
        candles.push(Candle::new(open, high, low, close, volume, timestamp));
    }

    if candles
        .last()
        .is_some_and(|last| last.timestamp + timeframe.duration() > now)
    {
        candles.pop();
    }

    validate_series(&candles)?;
    Ok(candles)
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        lookback_days: u32,
    ) -> Result<Vec<Candle>, SignalError> {
        let url = self.chart_url(symbol, timeframe, lookback_days)?;

        let response = (|| async { self.request(&url).await })
            .retry(ExponentialBuilder::default().with_max_times(self.max_retries))
            .when(|e: &reqwest::Error| e.is_timeout() || e.is_connect())
            .notify(|e: &reqwest::Error, delay: Duration| {
                warn!(
                    symbol = %symbol,
                    timeframe = %timeframe,
                    error = %e,
                    "Yahoo request failed, retrying in {:?}",
                    delay
                );
            })
            .await
            .map_err(|e| SignalError::DataUnavailable(format!("{} {}: {}", symbol, timeframe, e)))?;

        let candles = parse_chart(symbol, response, timeframe, Utc::now())?;
        debug!(
            symbol = %symbol,
            timeframe = %timeframe,
            count = candles.len(),
            "Fetched {} {} candles for {}",
            candles.len(),
            timeframe,
            symbol
        );
        Ok(candles)
    }
}
