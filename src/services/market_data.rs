//! Market data provider interface

use crate::models::indicators::Candle;
use crate::signals::error::SignalError;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Candle timeframes the engine consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M15,
    H1,
}

impl Timeframe {
    /// Interval code as used by the chart API
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Timeframe::M15 => Duration::minutes(15),
            Timeframe::H1 => Duration::hours(1),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Fetch the candles of `timeframe` covering the last `lookback_days`.
    ///
    /// Fails with `SignalError::DataUnavailable` when the series is empty or
    /// malformed.
    async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        lookback_days: u32,
    ) -> Result<Vec<Candle>, SignalError>;
}

/// Check a candle series against the supplier contract.
///
/// Non-empty, every candle consistent (finite, high/low bracketing the
/// body), strictly increasing timestamps.
pub fn validate_series(candles: &[Candle]) -> Result<(), SignalError> {
    if candles.is_empty() {
        return Err(SignalError::DataUnavailable("empty candle series".into()));
    }

    if let Some(bad) = candles.iter().find(|c| !c.is_consistent()) {
        return Err(SignalError::DataUnavailable(format!(
            "malformed candle at {}",
            bad.timestamp
        )));
    }

    if let Some(pair) = candles
        .windows(2)
        .find(|pair| pair[1].timestamp <= pair[0].timestamp)
    {
        return Err(SignalError::DataUnavailable(format!(
            "duplicate or out-of-order timestamp at {}",
            pair[1].timestamp
        )));
    }

    Ok(())
}
